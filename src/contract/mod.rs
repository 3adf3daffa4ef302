/// Profile registry contract seam
///
/// The on-chain registry maps an account address to the content identifier
/// of its published profile document. Reads are view calls; writes go
/// through the connected wallet and may be slow or rejected by the user.
/// ABI encoding and RPC transport live behind this trait in the
/// wallet-provider integration, outside this crate.
use crate::error::{FolioError, FolioResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Receipt for a confirmed pointer write
#[derive(Debug, Clone, PartialEq)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

#[async_trait]
pub trait ProfileRegistry: Send + Sync {
    /// Read the published content identifier for an address.
    ///
    /// `None` means no profile has been published.
    async fn profile_cid(&self, address: &str) -> FolioResult<Option<String>>;

    /// Point an address at a new content identifier.
    ///
    /// Requires wallet confirmation; rejection surfaces as
    /// [`FolioError::ContractWrite`].
    async fn set_profile_cid(&self, address: &str, cid: &str) -> FolioResult<TxReceipt>;
}

/// In-process registry for development and tests
#[derive(Default)]
pub struct MemoryRegistry {
    pointers: RwLock<HashMap<String, String>>,
    tx_counter: AtomicU64,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pointer directly, bypassing the transaction path
    pub async fn seed(&self, address: &str, cid: &str) {
        self.pointers
            .write()
            .await
            .insert(address.to_lowercase(), cid.to_string());
    }
}

#[async_trait]
impl ProfileRegistry for MemoryRegistry {
    async fn profile_cid(&self, address: &str) -> FolioResult<Option<String>> {
        Ok(self.pointers.read().await.get(&address.to_lowercase()).cloned())
    }

    async fn set_profile_cid(&self, address: &str, cid: &str) -> FolioResult<TxReceipt> {
        if cid.is_empty() {
            return Err(FolioError::ContractWrite(
                "Refusing to set an empty content identifier".to_string(),
            ));
        }

        self.pointers
            .write()
            .await
            .insert(address.to_lowercase(), cid.to_string());

        let seq = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let receipt = TxReceipt {
            tx_hash: format!("0xmem{:016x}", seq),
            block_number: Some(seq),
        };
        debug!("Registry pointer for {} set to {} ({})", address, cid, receipt.tx_hash);
        Ok(receipt)
    }
}
