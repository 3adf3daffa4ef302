/// In-memory content store for development and tests
use crate::content::ContentStore;
use crate::error::{FolioError, FolioResult};
use crate::profile::ProfileDocument;
use async_trait::async_trait;
use libipld::multihash::{Code, MultihashDigest};
use libipld::Cid;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// IPLD raw codec, the leaf encoding used for plain byte uploads
const RAW_CODEC: u64 = 0x55;

/// Content-addressed map: identifiers are real CIDv1 values computed from
/// the stored bytes, so uploads are deterministic and collision-free.
#[derive(Default)]
pub struct MemoryContentStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn cid_for(data: &[u8]) -> String {
        let hash = Code::Sha2_256.digest(data);
        Cid::new_v1(RAW_CODEC, hash).to_string()
    }

    /// Raw bytes stored under a content identifier, if present
    pub async fn raw(&self, cid: &str) -> Option<Vec<u8>> {
        self.blobs.read().await.get(cid).cloned()
    }

    async fn store(&self, data: Vec<u8>) -> String {
        let cid = Self::cid_for(&data);
        self.blobs.write().await.insert(cid.clone(), data);
        cid
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn upload_file(
        &self,
        data: Vec<u8>,
        _mime_type: &str,
        _file_name: Option<&str>,
    ) -> FolioResult<String> {
        Ok(self.store(data).await)
    }

    async fn upload_json(&self, document: &ProfileDocument) -> FolioResult<String> {
        let json = serde_json::to_vec(document)?;
        Ok(self.store(json).await)
    }

    async fn fetch_document(&self, cid: &str) -> FolioResult<ProfileDocument> {
        let data = self
            .raw(cid)
            .await
            .ok_or_else(|| FolioError::ContentFetch(format!("No content for {}", cid)))?;
        serde_json::from_slice(&data).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_cid;

    #[tokio::test]
    async fn test_upload_yields_valid_cid() {
        let store = MemoryContentStore::new();
        let cid = store
            .upload_file(b"image bytes".to_vec(), "image/png", None)
            .await
            .unwrap();
        assert!(parse_cid(&cid).is_ok());
        assert_eq!(store.raw(&cid).await, Some(b"image bytes".to_vec()));
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let store = MemoryContentStore::new();
        let mut doc = ProfileDocument::default();
        doc.name = "Alice".to_string();

        let cid = store.upload_json(&doc).await.unwrap();
        let fetched = store.fetch_document(&cid).await.unwrap();
        assert_eq!(fetched, doc);
    }

    #[tokio::test]
    async fn test_identical_content_same_cid() {
        let store = MemoryContentStore::new();
        let a = store.upload_file(b"x".to_vec(), "a/b", None).await.unwrap();
        let b = store.upload_file(b"x".to_vec(), "c/d", None).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_fetch_unknown_cid_fails() {
        let store = MemoryContentStore::new();
        assert!(store.fetch_document("bafyunknown").await.is_err());
    }
}
