#![allow(dead_code)]
//! Shared fixtures for integration tests: in-memory collaborators and
//! failure-injecting wrappers around them.

use async_trait::async_trait;
use chainfolio::cache::MemoryProfileCache;
use chainfolio::config::{
    ApiConfig, DashboardConfig, GatewayConfig, LoggingConfig, RegistryConfig, StorageConfig,
};
use chainfolio::content::MemoryContentStore;
use chainfolio::contract::{MemoryRegistry, ProfileRegistry, TxReceipt};
use chainfolio::error::{FolioError, FolioResult};
use chainfolio::session::AuthClient;
use chainfolio::storage::MemoryDraftStorage;
use chainfolio::wallet::MemoryWallet;
use chainfolio::Dashboard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const ADDRESS: &str = "0xABC";
pub const NONCE: &str = "it-nonce";

pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        api: ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            domain: "localhost:3000".to_string(),
            statement: "Sign in to your portfolio dashboard".to_string(),
        },
        gateway: GatewayConfig::Proxy,
        registry: RegistryConfig {
            contract_address: format!("0x{}", "ab".repeat(20)),
            chain_id: 1,
        },
        storage: StorageConfig {
            draft_directory: "./data/drafts".into(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
    }
}

/// Verifier that accepts any message carrying the fixture nonce
pub struct AcceptingAuth;

#[async_trait]
impl AuthClient for AcceptingAuth {
    async fn nonce(&self) -> FolioResult<String> {
        Ok(NONCE.to_string())
    }

    async fn verify(&self, message: &str, _signature: &str) -> FolioResult<()> {
        if message.contains(&format!("Nonce: {}", NONCE)) {
            Ok(())
        } else {
            Err(FolioError::Verification("Unknown nonce".to_string()))
        }
    }

    async fn logout(&self) -> FolioResult<()> {
        Ok(())
    }
}

/// Verifier that rejects every signature
pub struct RejectingAuth;

#[async_trait]
impl AuthClient for RejectingAuth {
    async fn nonce(&self) -> FolioResult<String> {
        Ok(NONCE.to_string())
    }

    async fn verify(&self, _message: &str, _signature: &str) -> FolioResult<()> {
        Err(FolioError::Verification("Bad signature".to_string()))
    }

    async fn logout(&self) -> FolioResult<()> {
        Ok(())
    }
}

/// Auth whose logout endpoint is down; verification still works
pub struct FailingLogoutAuth;

#[async_trait]
impl AuthClient for FailingLogoutAuth {
    async fn nonce(&self) -> FolioResult<String> {
        Ok(NONCE.to_string())
    }

    async fn verify(&self, _message: &str, _signature: &str) -> FolioResult<()> {
        Ok(())
    }

    async fn logout(&self) -> FolioResult<()> {
        Err(FolioError::Authentication("Logout endpoint 500".to_string()))
    }
}

/// Registry whose writes are always rejected (user declined the prompt);
/// reads delegate to the wrapped registry.
pub struct RejectingRegistry {
    pub inner: Arc<MemoryRegistry>,
}

#[async_trait]
impl ProfileRegistry for RejectingRegistry {
    async fn profile_cid(&self, address: &str) -> FolioResult<Option<String>> {
        self.inner.profile_cid(address).await
    }

    async fn set_profile_cid(&self, _address: &str, _cid: &str) -> FolioResult<TxReceipt> {
        Err(FolioError::ContractWrite(
            "User rejected the transaction".to_string(),
        ))
    }
}

/// Registry whose reads always fail (RPC down); writes delegate
pub struct UnreadableRegistry {
    pub inner: Arc<MemoryRegistry>,
}

#[async_trait]
impl ProfileRegistry for UnreadableRegistry {
    async fn profile_cid(&self, _address: &str) -> FolioResult<Option<String>> {
        Err(FolioError::ContractRead("RPC unavailable".to_string()))
    }

    async fn set_profile_cid(&self, address: &str, cid: &str) -> FolioResult<TxReceipt> {
        self.inner.set_profile_cid(address, cid).await
    }
}

/// Registry that stalls its next read after returning the pointer value,
/// used to interleave a stale load with a fresh one.
pub struct StallingRegistry {
    pub inner: Arc<MemoryRegistry>,
    stall_next: AtomicBool,
}

impl StallingRegistry {
    pub fn new(inner: Arc<MemoryRegistry>) -> Self {
        Self {
            inner,
            stall_next: AtomicBool::new(true),
        }
    }

    /// Like [`StallingRegistry::new`] but reads pass through until armed
    pub fn disarmed(inner: Arc<MemoryRegistry>) -> Self {
        Self {
            inner,
            stall_next: AtomicBool::new(false),
        }
    }

    /// Stall the next read
    pub fn arm(&self) {
        self.stall_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileRegistry for StallingRegistry {
    async fn profile_cid(&self, address: &str) -> FolioResult<Option<String>> {
        let pointer = self.inner.profile_cid(address).await;
        if self.stall_next.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        pointer
    }

    async fn set_profile_cid(&self, address: &str, cid: &str) -> FolioResult<TxReceipt> {
        self.inner.set_profile_cid(address, cid).await
    }
}

/// Everything a wired test harness needs to inspect afterwards
pub struct Harness {
    pub dash: Dashboard,
    pub wallet: Arc<MemoryWallet>,
    pub content: Arc<MemoryContentStore>,
    pub cache: Arc<MemoryProfileCache>,
    pub storage: Arc<MemoryDraftStorage>,
}

/// Wire a dashboard around an arbitrary registry and auth client
pub fn wire(registry: Arc<dyn ProfileRegistry>, auth: Arc<dyn AuthClient>) -> Harness {
    let wallet = Arc::new(MemoryWallet::new(ADDRESS, 1));
    let content = Arc::new(MemoryContentStore::new());
    let cache = Arc::new(MemoryProfileCache::new());
    let storage = Arc::new(MemoryDraftStorage::new());

    let dash = Dashboard::with_collaborators(
        test_config(),
        wallet.clone(),
        auth,
        content.clone(),
        registry,
        cache.clone(),
        storage.clone(),
    )
    .expect("harness config is valid");

    Harness {
        dash,
        wallet,
        content,
        cache,
        storage,
    }
}

/// Default harness: accepting auth, fresh in-memory registry
pub fn harness() -> (Harness, Arc<MemoryRegistry>) {
    let registry = Arc::new(MemoryRegistry::new());
    (wire(registry.clone(), Arc::new(AcceptingAuth)), registry)
}
