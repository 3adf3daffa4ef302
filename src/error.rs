/// Unified error types for the chainfolio state engine
use thiserror::Error;

/// Main error type for dashboard state operations
#[derive(Error, Debug)]
pub enum FolioError {
    /// Login handshake errors (missing wallet, nonce fetch, signing)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Server rejected the signed message (bad signature, stale nonce)
    #[error("Verification rejected: {0}")]
    Verification(String),

    /// Wallet collaborator errors (signing refused, disconnected mid-flight)
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Smart-contract pointer read errors
    #[error("Contract read error: {0}")]
    ContractRead(String),

    /// Smart-contract pointer write errors (including user rejection)
    #[error("Contract write error: {0}")]
    ContractWrite(String),

    /// File or JSON upload errors
    #[error("Upload error: {0}")]
    Upload(String),

    /// Content-addressed fetch errors
    #[error("Content fetch error: {0}")]
    ContentFetch(String),

    /// Server-side profile cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Durable draft storage errors
    #[error("Draft storage error: {0}")]
    Storage(String),

    /// Validation errors (featured-project limit, malformed media payloads)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for dashboard operations
pub type FolioResult<T> = Result<T, FolioError>;
