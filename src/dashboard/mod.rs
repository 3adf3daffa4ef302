/// Dashboard controller and state ownership
///
/// Single owner of session state, the draft store, and the published
/// baseline. All mutation funnels through this controller; UI forms hold
/// a cheap clone and call its methods instead of sharing ambient state.
pub mod loader;
pub mod publish;

pub use loader::{DraftSource, LoadState};

use crate::cache::{HttpProfileCache, ProfileCache};
use crate::config::DashboardConfig;
use crate::content::{ContentStore, HttpContentStore};
use crate::contract::ProfileRegistry;
use crate::error::{FolioError, FolioResult};
use crate::profile::{DraftPatch, ProfileDocument, MAX_FEATURED_PROJECTS};
use crate::session::{AuthClient, HttpAuthClient, SignInMessage};
use crate::storage::{DiskDraftStorage, DraftStorage, DraftStore};
use crate::wallet::Wallet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Mutable dashboard state, guarded by one lock
struct DashboardState {
    authenticated: bool,
    draft: Option<DraftStore>,
    baseline: Option<ProfileDocument>,
    load_state: LoadState,
}

impl DashboardState {
    fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            draft: None,
            baseline: None,
            load_state: LoadState::Unauthenticated,
        }
    }
}

/// The dashboard state engine.
///
/// Cheap to clone; clones share the same state and collaborators.
#[derive(Clone)]
pub struct Dashboard {
    config: Arc<DashboardConfig>,
    wallet: Arc<dyn Wallet>,
    auth: Arc<dyn AuthClient>,
    content: Arc<dyn ContentStore>,
    registry: Arc<dyn ProfileRegistry>,
    cache: Arc<dyn ProfileCache>,
    draft_storage: Arc<dyn DraftStorage>,
    state: Arc<RwLock<DashboardState>>,
    publishing: Arc<AtomicBool>,
    load_generation: Arc<AtomicU64>,
}

impl Dashboard {
    /// Create a dashboard wired to HTTP collaborators built from config.
    ///
    /// The wallet and the contract registry are provider integrations the
    /// embedding application supplies.
    pub fn new(
        config: DashboardConfig,
        wallet: Arc<dyn Wallet>,
        registry: Arc<dyn ProfileRegistry>,
    ) -> FolioResult<Self> {
        config.validate()?;

        // One client with a cookie store, shared so the session cookie
        // from the verify endpoint rides along on cache requests
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        let auth = Arc::new(HttpAuthClient::new(
            client.clone(),
            config.api.base_url.clone(),
        ));
        let content = Arc::new(HttpContentStore::new(
            client.clone(),
            config.api.base_url.clone(),
            config.gateway.clone(),
        ));
        let cache = Arc::new(HttpProfileCache::new(client, config.api.base_url.clone()));
        let draft_storage = Arc::new(DiskDraftStorage::new(
            config.storage.draft_directory.clone(),
        ));

        Self::with_collaborators(config, wallet, auth, content, registry, cache, draft_storage)
    }

    /// Create a dashboard with every collaborator injected
    pub fn with_collaborators(
        config: DashboardConfig,
        wallet: Arc<dyn Wallet>,
        auth: Arc<dyn AuthClient>,
        content: Arc<dyn ContentStore>,
        registry: Arc<dyn ProfileRegistry>,
        cache: Arc<dyn ProfileCache>,
        draft_storage: Arc<dyn DraftStorage>,
    ) -> FolioResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            wallet,
            auth,
            content,
            registry,
            cache,
            draft_storage,
            state: Arc::new(RwLock::new(DashboardState::unauthenticated())),
            publishing: Arc::new(AtomicBool::new(false)),
            load_generation: Arc::new(AtomicU64::new(0)),
        })
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.authenticated
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load_state
    }

    /// Current draft document, if a session is loaded
    pub async fn draft(&self) -> Option<ProfileDocument> {
        self.state
            .read()
            .await
            .draft
            .as_ref()
            .and_then(|d| d.document().cloned())
    }

    /// Last document known to match the on-chain pointer
    pub async fn baseline(&self) -> Option<ProfileDocument> {
        self.state.read().await.baseline.clone()
    }

    pub fn is_publishing(&self) -> bool {
        self.publishing.load(Ordering::SeqCst)
    }

    /// Sign in with the connected wallet.
    ///
    /// Fetches a nonce, signs the structured message, submits it for
    /// verification, then resolves the draft. Any failure leaves the
    /// session unauthenticated; nothing retries automatically.
    pub async fn login(&self) -> FolioResult<()> {
        let address = self
            .wallet
            .address()
            .ok_or_else(|| FolioError::Authentication("No wallet connected".to_string()))?;

        let nonce = self.auth.nonce().await?;
        let message = SignInMessage::new(
            self.config.api.domain.clone(),
            address.clone(),
            self.config.api.statement.clone(),
            self.config.api.base_url.clone(),
            self.wallet.chain_id(),
            nonce,
        )
        .prepare();

        let signature = self.wallet.sign_message(&message).await?;
        self.auth.verify(&message, &signature).await?;

        info!("Session established for {}", address);
        self.state.write().await.authenticated = true;
        self.reload().await;
        Ok(())
    }

    /// Sign out: drop all local state, tear down the server session
    /// (best-effort), disconnect the wallet.
    pub async fn logout(&self) {
        {
            let mut state = self.state.write().await;
            state.authenticated = false;
            state.baseline = None;
            state.load_state = LoadState::Unauthenticated;
            if let Some(mut draft) = state.draft.take() {
                draft.clear().await;
            }
        }

        if let Err(e) = self.auth.logout().await {
            warn!("Session cookie teardown failed: {}", e);
        }
        self.wallet.disconnect().await;
        info!("Logged out");
    }

    /// Merge a partial update into the draft and mirror it durably.
    ///
    /// A no-op while unauthenticated or before a draft is loaded. A patch
    /// whose project list would exceed the featured limit is rejected
    /// without mutating anything.
    pub async fn save_draft(&self, patch: DraftPatch) -> FolioResult<()> {
        let mut state = self.state.write().await;
        if !state.authenticated {
            debug!("save_draft ignored: not authenticated");
            return Ok(());
        }

        if let Some(projects) = &patch.projects {
            let featured = projects.iter().filter(|p| p.is_featured).count();
            if featured > MAX_FEATURED_PROJECTS {
                return Err(FolioError::Validation(format!(
                    "At most {} projects can be featured",
                    MAX_FEATURED_PROJECTS
                )));
            }
        }

        match state.draft.as_mut() {
            Some(draft) => draft.merge(patch).await,
            None => {
                debug!("save_draft ignored: no draft loaded");
                Ok(())
            }
        }
    }

    /// Convenience for the animation preset picker
    pub async fn set_animation(&self, preset: &str) -> FolioResult<()> {
        self.save_draft(DraftPatch::default().animation(preset)).await
    }

    /// True iff the draft's serialized form differs from the baseline's
    pub async fn has_unpublished_changes(&self) -> bool {
        let state = self.state.read().await;
        match (
            state.baseline.as_ref(),
            state.draft.as_ref().and_then(|d| d.document()),
        ) {
            (Some(baseline), Some(draft)) => baseline.serialized() != draft.serialized(),
            _ => false,
        }
    }
}
