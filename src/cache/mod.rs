/// Server-side profile cache client
///
/// The backend keeps the last published document per identity so public
/// pages render without touching the chain or the gateway. The cache is
/// advisory: reads fall back to other sources, writes are best-effort.
use crate::error::{FolioError, FolioResult};
use crate::profile::ProfileDocument;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Fetch the cached document for the authenticated identity.
    ///
    /// `None` means authenticated but nothing cached yet.
    async fn fetch(&self) -> FolioResult<Option<ProfileDocument>>;

    /// Mirror a published document to the cache
    async fn store(&self, document: &ProfileDocument) -> FolioResult<()>;
}

/// Cache endpoint response body
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    profile: Option<ProfileDocument>,
}

/// HTTP implementation against the backend profile endpoint.
///
/// Identity comes from the session cookie, so the client must share the
/// cookie store with [`crate::session::HttpAuthClient`].
pub struct HttpProfileCache {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileCache {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ProfileCache for HttpProfileCache {
    async fn fetch(&self) -> FolioResult<Option<ProfileDocument>> {
        let url = format!("{}/api/user/profile", self.base_url);
        debug!("Fetching cached profile from {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(FolioError::Cache(format!(
                "Profile cache returned {}",
                response.status()
            )));
        }

        let body: ProfileResponse = response.json().await?;
        Ok(body.profile)
    }

    async fn store(&self, document: &ProfileDocument) -> FolioResult<()> {
        let url = format!("{}/api/user/profile", self.base_url);
        debug!("Mirroring published profile to {}", url);

        let response = self.client.post(&url).json(document).send().await?;
        if !response.status().is_success() {
            return Err(FolioError::Cache(format!(
                "Profile cache write returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// In-memory cache for development and tests
#[derive(Default)]
pub struct MemoryProfileCache {
    document: RwLock<Option<ProfileDocument>>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache directly
    pub async fn seed(&self, document: ProfileDocument) {
        *self.document.write().await = Some(document);
    }
}

#[async_trait]
impl ProfileCache for MemoryProfileCache {
    async fn fetch(&self) -> FolioResult<Option<ProfileDocument>> {
        Ok(self.document.read().await.clone())
    }

    async fn store(&self, document: &ProfileDocument) -> FolioResult<()> {
        *self.document.write().await = Some(document.clone());
        Ok(())
    }
}
