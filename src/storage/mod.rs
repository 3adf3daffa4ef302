/// Durable draft storage
///
/// Holds the user's in-progress profile document, mirrored to a durable
/// backend keyed by identity. The backend is best-effort: any failure is
/// logged and treated as a cache miss so a broken store degrades to
/// in-memory-only drafts, never an error surfaced to the user.
pub mod disk;
pub mod memory;

pub use disk::DiskDraftStorage;
pub use memory::MemoryDraftStorage;

use crate::error::FolioResult;
use crate::profile::{DraftPatch, ProfileDocument};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Logical storage key for an identity's draft
pub fn draft_key(identity: &str) -> String {
    format!("draft:{}", identity.to_lowercase())
}

/// Durable key-value backend for serialized drafts
#[async_trait]
pub trait DraftStorage: Send + Sync {
    /// Read the stored draft JSON for an identity
    async fn get(&self, identity: &str) -> FolioResult<Option<String>>;

    /// Store the draft JSON for an identity
    async fn put(&self, identity: &str, document_json: &str) -> FolioResult<()>;

    /// Remove the stored draft for an identity
    async fn remove(&self, identity: &str) -> FolioResult<()>;
}

/// In-memory draft for one identity, mirrored to a durable backend.
///
/// The only component that writes the durable mirror; the publish
/// pipeline's removal on success goes through [`DraftStore::remove_durable`].
pub struct DraftStore {
    identity: String,
    backend: Arc<dyn DraftStorage>,
    document: Option<ProfileDocument>,
}

impl DraftStore {
    pub fn new(identity: impl Into<String>, backend: Arc<dyn DraftStorage>) -> Self {
        Self {
            identity: identity.into(),
            backend,
            document: None,
        }
    }

    /// Create a store pre-seeded with a resolved document.
    ///
    /// Does not mirror: a durable entry exists only once the user edits.
    pub fn with_document(
        identity: impl Into<String>,
        backend: Arc<dyn DraftStorage>,
        document: ProfileDocument,
    ) -> Self {
        Self {
            identity: identity.into(),
            backend,
            document: Some(document),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn document(&self) -> Option<&ProfileDocument> {
        self.document.as_ref()
    }

    /// Read the durable draft entry for this identity, if any.
    ///
    /// Backend failures and unparseable entries are logged and treated as
    /// a miss.
    pub async fn load_durable(&self) -> Option<ProfileDocument> {
        let json = match self.backend.get(&self.identity).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!("Draft storage read failed for {}: {}", self.identity, e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!("Stored draft for {} is unparseable: {}", self.identity, e);
                None
            }
        }
    }

    /// Replace the in-memory document without touching the durable mirror
    pub fn replace(&mut self, document: ProfileDocument) {
        self.document = Some(document);
    }

    /// Merge a partial update into the draft and mirror the result.
    ///
    /// Mirror failures degrade to in-memory-only and are not surfaced.
    pub async fn merge(&mut self, patch: DraftPatch) -> FolioResult<()> {
        let document = self.document.get_or_insert_with(ProfileDocument::default);
        patch.apply_to(document);

        let json = serde_json::to_string(document)?;
        if let Err(e) = self.backend.put(&self.identity, &json).await {
            warn!(
                "Draft mirror write failed for {}, continuing in-memory: {}",
                self.identity, e
            );
        } else {
            debug!("Draft mirrored for {}", self.identity);
        }
        Ok(())
    }

    /// Remove the durable entry (best-effort), keeping the in-memory document
    pub async fn remove_durable(&self) {
        if let Err(e) = self.backend.remove(&self.identity).await {
            warn!("Draft storage remove failed for {}: {}", self.identity, e);
        }
    }

    /// Drop the in-memory document and the durable entry
    pub async fn clear(&mut self) {
        self.document = None;
        self.remove_durable().await;
    }
}
