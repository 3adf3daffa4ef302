/// Publish pipeline
///
/// Takes a snapshot of the draft and, in strict order: uploads pending
/// media, uploads the resolved JSON document, writes the content
/// identifier on-chain, mirrors to the server cache, then reconciles
/// local state. Failure before the contract write leaves the draft and
/// its durable mirror untouched so the user can retry.
use crate::content::{cid_uri, parse_cid};
use crate::contract::TxReceipt;
use crate::dashboard::Dashboard;
use crate::error::{FolioError, FolioResult};
use crate::profile::{MediaRef, ProfileDocument};
use std::sync::atomic::Ordering;
use tracing::{debug, info, warn};

impl Dashboard {
    /// Publish the current draft.
    ///
    /// Edits made while the publish is in flight do not affect it; the
    /// loader is gated for the duration so the pointer read cannot race
    /// the pending write.
    pub async fn publish(&self) -> FolioResult<TxReceipt> {
        let (address, snapshot) = {
            let state = self.state.read().await;
            if !state.authenticated {
                return Err(FolioError::Authentication("Not signed in".to_string()));
            }
            let draft = state
                .draft
                .as_ref()
                .ok_or_else(|| FolioError::Validation("No draft loaded".to_string()))?;
            let document = draft
                .document()
                .cloned()
                .ok_or_else(|| FolioError::Validation("Draft is empty".to_string()))?;
            (draft.identity().to_string(), document)
        };

        if self.publishing.swap(true, Ordering::SeqCst) {
            return Err(FolioError::Validation(
                "A publish is already in progress".to_string(),
            ));
        }

        info!("Publishing profile for {}", address);
        let outcome = match self.run_pipeline(&address, snapshot).await {
            Ok((document, receipt)) => {
                let mut state = self.state.write().await;
                // Any resolution started against the old pointer is stale now
                self.load_generation.fetch_add(1, Ordering::SeqCst);
                if let Some(draft) = state.draft.as_mut() {
                    draft.replace(document.clone());
                    draft.remove_durable().await;
                }
                state.baseline = Some(document);
                info!("Publish for {} confirmed in {}", address, receipt.tx_hash);
                Ok(receipt)
            }
            Err(e) => {
                warn!("Publish for {} failed, draft left untouched: {}", address, e);
                Err(e)
            }
        };
        self.publishing.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_pipeline(
        &self,
        address: &str,
        mut document: ProfileDocument,
    ) -> FolioResult<(ProfileDocument, TxReceipt)> {
        // Step 1: resolve every pending media reference to a published URI
        if let Some(media) = document.image.take() {
            document.image = Some(self.resolve_media(media).await?);
        }

        match document.readme.take() {
            Some(media) if media.is_pending() => {
                if let MediaRef::Pending {
                    file_name: Some(ref name),
                    ..
                } = media
                {
                    document.readme_name = Some(name.clone());
                }
                document.readme = Some(self.resolve_media(media).await?);
            }
            Some(published) => {
                // Clearing the display name in the settings UI drops the
                // published readme as well
                if document.readme_name.is_some() {
                    document.readme = Some(published);
                }
            }
            None => {}
        }

        for project in &mut document.projects {
            if let Some(media) = project.media.take() {
                project.media = Some(self.resolve_media(media).await?);
            }
        }
        for certificate in &mut document.activity.certificates {
            if let Some(media) = certificate.media.take() {
                certificate.media = Some(self.resolve_media(media).await?);
            }
        }
        debug_assert!(!document.has_pending_media());

        // Step 2: upload the fully-resolved document
        let master_cid = self.content.upload_json(&document).await?;
        parse_cid(&master_cid)?;
        debug!("Master document for {} uploaded as {}", address, master_cid);

        // Step 3: point the on-chain registry at the new document
        let receipt = self.registry.set_profile_cid(address, &master_cid).await?;

        // Step 4: mirror to the server cache; the pointer is already the
        // source of truth, so a failure here does not roll anything back
        if let Err(e) = self.cache.store(&document).await {
            warn!("Cache mirror failed after on-chain write: {}", e);
        }

        Ok((document, receipt))
    }

    /// Upload a pending media payload, replacing it with its `ipfs://` URI
    async fn resolve_media(&self, media: MediaRef) -> FolioResult<MediaRef> {
        if let MediaRef::Pending {
            ref mime_type,
            ref file_name,
            ..
        } = media
        {
            let bytes = media.decode_payload()?;
            let cid = self
                .content
                .upload_file(bytes, mime_type, file_name.as_deref())
                .await?;
            return Ok(MediaRef::published(cid_uri(&cid)));
        }
        Ok(media)
    }
}
