//! chainfolio — wallet-native portfolio dashboard state engine
//!
//! A user connects a crypto wallet, signs a structured sign-in message,
//! edits a profile document, and publishes it by uploading the document to
//! content-addressed storage and recording the content identifier in a
//! smart contract. This crate owns the draft/publish reconciliation:
//! session state, the durable draft store, the priority-ordered loader,
//! and the multi-step publish pipeline. Rendering, wallet UX, and
//! signature cryptography live with external collaborators behind the
//! [`wallet::Wallet`], [`contract::ProfileRegistry`], and HTTP client
//! seams.

pub mod cache;
pub mod config;
pub mod content;
pub mod contract;
pub mod dashboard;
pub mod error;
pub mod profile;
pub mod session;
pub mod storage;
pub mod wallet;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DraftSource, LoadState};
pub use error::{FolioError, FolioResult};
pub use profile::{DraftPatch, MediaRef, ProfileDocument};

/// Initialize tracing for embedding applications that do not configure
/// their own subscriber.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chainfolio=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
