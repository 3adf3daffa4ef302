/// Wallet collaborator seam
///
/// The connected wallet supplies the identity (account address), signs the
/// sign-in message, and can be disconnected on logout. Signature
/// cryptography is entirely the wallet's concern; this crate never touches
/// key material.
use crate::error::{FolioError, FolioResult};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[async_trait]
pub trait Wallet: Send + Sync {
    /// Connected account address, `None` when disconnected
    fn address(&self) -> Option<String>;

    /// Chain the wallet is connected to
    fn chain_id(&self) -> u64;

    /// Sign a message with the connected account.
    ///
    /// May be slow (user prompt) or rejected by the user.
    async fn sign_message(&self, message: &str) -> FolioResult<String>;

    /// Disconnect the wallet session
    async fn disconnect(&self);
}

/// In-process wallet for development and tests.
///
/// Produces opaque deterministic signatures; a matching verifier can
/// recompute them, a real backend cannot, so never wire this against a
/// production verify endpoint.
pub struct MemoryWallet {
    address: String,
    chain_id: u64,
    connected: AtomicBool,
}

impl MemoryWallet {
    pub fn new(address: impl Into<String>, chain_id: u64) -> Self {
        Self {
            address: address.into(),
            chain_id,
            connected: AtomicBool::new(true),
        }
    }

    /// Recompute the signature this wallet would produce for a message
    pub fn expected_signature(address: &str, message: &str) -> String {
        format!("memsig:{}:{}", address, BASE64.encode(message))
    }
}

#[async_trait]
impl Wallet for MemoryWallet {
    fn address(&self) -> Option<String> {
        if self.connected.load(Ordering::SeqCst) {
            Some(self.address.clone())
        } else {
            None
        }
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn sign_message(&self, message: &str) -> FolioResult<String> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(FolioError::Wallet("Wallet is disconnected".to_string()));
        }
        Ok(Self::expected_signature(&self.address, message))
    }

    async fn disconnect(&self) {
        debug!("Memory wallet disconnected");
        self.connected.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_and_disconnect() {
        let wallet = MemoryWallet::new("0xabc", 1);
        assert_eq!(wallet.address(), Some("0xabc".to_string()));

        let sig = wallet.sign_message("hello").await.unwrap();
        assert_eq!(sig, MemoryWallet::expected_signature("0xabc", "hello"));

        wallet.disconnect().await;
        assert_eq!(wallet.address(), None);
        assert!(wallet.sign_message("hello").await.is_err());
    }
}
