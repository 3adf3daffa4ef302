/// Login/logout transition tests
mod common;

use chainfolio::contract::MemoryRegistry;
use chainfolio::error::FolioError;
use chainfolio::profile::DraftPatch;
use chainfolio::storage::DraftStorage;
use chainfolio::wallet::Wallet;
use common::*;
use std::sync::Arc;

#[tokio::test]
async fn test_rejected_verification_leaves_no_partial_session() {
    let h = wire(Arc::new(MemoryRegistry::new()), Arc::new(RejectingAuth));

    let result = h.dash.login().await;
    assert!(matches!(result, Err(FolioError::Verification(_))));
    assert!(!h.dash.is_authenticated().await);
    assert!(h.dash.draft().await.is_none());

    // Not retried automatically; a second explicit attempt fails the same way
    assert!(h.dash.login().await.is_err());
}

#[tokio::test]
async fn test_login_without_wallet_fails() {
    let (h, _registry) = harness();
    h.wallet.disconnect().await;

    let result = h.dash.login().await;
    assert!(matches!(result, Err(FolioError::Authentication(_))));
    assert!(!h.dash.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_is_best_effort_about_the_server_cookie() {
    let h = wire(Arc::new(MemoryRegistry::new()), Arc::new(FailingLogoutAuth));
    h.dash.login().await.unwrap();
    h.dash
        .save_draft(DraftPatch::default().name("Alice"))
        .await
        .unwrap();
    assert!(h.storage.get(ADDRESS).await.unwrap().is_some());

    // The logout endpoint is down, but local state is torn down anyway
    // and the wallet ends up disconnected
    h.dash.logout().await;
    assert!(!h.dash.is_authenticated().await);
    assert!(h.dash.draft().await.is_none());
    assert!(h.storage.get(ADDRESS).await.unwrap().is_none());
    assert_eq!(h.wallet.address(), None);
}
