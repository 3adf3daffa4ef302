/// Disk-based draft storage backend
use crate::error::{FolioError, FolioResult};
use crate::storage::{draft_key, DraftStorage};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Stores one JSON file per identity under a base directory.
///
/// The logical key `draft:<identity>` maps to `<base>/draft-<identity>.json`
/// with the identity lowercased, since `:` is not portable in file names.
#[derive(Clone)]
pub struct DiskDraftStorage {
    base_path: PathBuf,
}

impl DiskDraftStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn entry_path(&self, identity: &str) -> PathBuf {
        let file_name = draft_key(identity).replace(':', "-");
        self.base_path.join(format!("{}.json", file_name))
    }

    async fn ensure_base_dir(&self) -> FolioResult<()> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            FolioError::Storage(format!("Failed to create draft directory: {}", e))
        })
    }
}

#[async_trait]
impl DraftStorage for DiskDraftStorage {
    async fn get(&self, identity: &str) -> FolioResult<Option<String>> {
        let path = self.entry_path(identity);

        match fs::read_to_string(&path).await {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FolioError::Storage(format!(
                "Failed to read draft for {}: {}",
                identity, e
            ))),
        }
    }

    async fn put(&self, identity: &str, document_json: &str) -> FolioResult<()> {
        self.ensure_base_dir().await?;
        let path = self.entry_path(identity);

        fs::write(&path, document_json).await.map_err(|e| {
            FolioError::Storage(format!("Failed to write draft for {}: {}", identity, e))
        })
    }

    async fn remove(&self, identity: &str) -> FolioResult<()> {
        let path = self.entry_path(identity);

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FolioError::Storage(format!(
                "Failed to remove draft for {}: {}",
                identity, e
            ))),
        }
    }
}
