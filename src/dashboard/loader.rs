/// Draft resolution on session start
///
/// Resolves the draft's initial value in priority order: durable local
/// draft, on-chain document, server cache, built-in default. Each load
/// attempt carries a generation number; a resolution that completes after
/// being superseded is discarded instead of clobbering newer state.
use crate::dashboard::Dashboard;
use crate::profile::ProfileDocument;
use crate::storage::DraftStore;
use std::sync::atomic::Ordering;
use tracing::{debug, info, warn};

/// Loader state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unauthenticated,
    ResolvingPointer,
    ResolvingContent,
    Ready,
}

/// Which source supplied the resolved draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSource {
    LocalDraft,
    OnChain,
    ServerCache,
    BuiltinDefault,
}

impl Dashboard {
    /// Re-resolve the draft for the current identity.
    ///
    /// Skipped while a publish is in flight so the pointer read cannot
    /// race the pending write. Failures at every step fall through to the
    /// next source; this never surfaces an error.
    pub async fn reload(&self) {
        if self.is_publishing() {
            debug!("Reload skipped: publish in flight");
            return;
        }

        let Some(address) = self.wallet.address() else {
            let mut state = self.state.write().await;
            *state = super::DashboardState::unauthenticated();
            return;
        };

        if !self.is_authenticated().await {
            debug!("Reload skipped: not authenticated");
            return;
        }

        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_load_state(LoadState::ResolvingPointer).await;

        let pointer = match self.registry.profile_cid(&address).await {
            Ok(pointer) => pointer,
            Err(e) => {
                // Conflated with "nothing published" by policy; the warn
                // keeps genuine RPC failure visible in telemetry
                warn!(
                    "Contract pointer read failed for {}, treating as unpublished: {}",
                    address, e
                );
                None
            }
        };

        self.set_load_state(LoadState::ResolvingContent).await;

        let published = self.resolve_published(&address, pointer.as_deref()).await;

        // The user's own unsaved edits take precedence over anything
        // published; the baseline still comes from the published side
        let probe = DraftStore::new(address.clone(), self.draft_storage.clone());
        let (document, source) = match probe.load_durable().await {
            Some(local) => (local, DraftSource::LocalDraft),
            None => match &published {
                Some((doc, src)) => (doc.clone(), *src),
                None => (ProfileDocument::default(), DraftSource::BuiltinDefault),
            },
        };
        let baseline = published
            .map(|(doc, _)| doc)
            .unwrap_or_else(ProfileDocument::default);

        let mut state = self.state.write().await;
        if self.load_generation.load(Ordering::SeqCst) != generation {
            debug!("Load generation {} superseded, discarding resolution", generation);
            return;
        }
        if !state.authenticated || self.wallet.address().as_deref() != Some(address.as_str()) {
            debug!("Session changed during load, discarding resolution");
            return;
        }

        info!("Draft for {} resolved from {:?}", address, source);
        state.draft = Some(DraftStore::with_document(
            address,
            self.draft_storage.clone(),
            document,
        ));
        state.baseline = Some(baseline);
        state.load_state = LoadState::Ready;
    }

    /// Resolve the published document: on-chain content first, then the
    /// server cache. `None` means nothing published and nothing cached.
    async fn resolve_published(
        &self,
        address: &str,
        pointer: Option<&str>,
    ) -> Option<(ProfileDocument, DraftSource)> {
        if let Some(cid) = pointer {
            match self.content.fetch_document(cid).await {
                Ok(document) => return Some((document, DraftSource::OnChain)),
                Err(e) => {
                    warn!("Content fetch for {} failed, falling back to cache: {}", cid, e);
                }
            }
        }

        match self.cache.fetch().await {
            Ok(Some(document)) => Some((document, DraftSource::ServerCache)),
            Ok(None) => None,
            Err(e) => {
                warn!("Profile cache read failed for {}: {}", address, e);
                None
            }
        }
    }

    async fn set_load_state(&self, next: LoadState) {
        self.state.write().await.load_state = next;
    }
}
