/// In-memory draft storage backend
use crate::error::{FolioError, FolioResult};
use crate::storage::{draft_key, DraftStorage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Map-backed storage for tests and for degraded contexts where durable
/// storage is unavailable. Can be switched into a failing mode to
/// exercise the best-effort fallback paths.
#[derive(Default)]
pub struct MemoryDraftStorage {
    entries: RwLock<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryDraftStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (simulates a blocked store)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> FolioResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(FolioError::Storage("Storage unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DraftStorage for MemoryDraftStorage {
    async fn get(&self, identity: &str) -> FolioResult<Option<String>> {
        self.check_available()?;
        Ok(self.entries.read().await.get(&draft_key(identity)).cloned())
    }

    async fn put(&self, identity: &str, document_json: &str) -> FolioResult<()> {
        self.check_available()?;
        self.entries
            .write()
            .await
            .insert(draft_key(identity), document_json.to_string());
        Ok(())
    }

    async fn remove(&self, identity: &str) -> FolioResult<()> {
        self.check_available()?;
        self.entries.write().await.remove(&draft_key(identity));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let backend = MemoryDraftStorage::new();
        backend.put("0xABC", "{}").await.unwrap();
        assert_eq!(backend.get("0xABC").await.unwrap(), Some("{}".to_string()));
        backend.remove("0xABC").await.unwrap();
        assert_eq!(backend.get("0xABC").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let backend = MemoryDraftStorage::new();
        backend.set_failing(true);
        assert!(backend.put("0xABC", "{}").await.is_err());
        assert!(backend.get("0xABC").await.is_err());
    }
}
