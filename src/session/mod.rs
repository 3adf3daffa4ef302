/// Sign-in session protocol
///
/// Builds the structured sign-in message and talks to the server's
/// nonce/verify/logout endpoints. The server owns signature verification
/// and the session cookie; this module only drives the handshake.
use crate::error::{FolioError, FolioResult};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structured sign-in message (EIP-4361 style).
///
/// The rendered text is what the wallet signs and what the verify
/// endpoint checks the signature against, so the layout must stay stable.
#[derive(Debug, Clone)]
pub struct SignInMessage {
    pub domain: String,
    pub address: String,
    pub statement: String,
    pub uri: String,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
}

impl SignInMessage {
    pub fn new(
        domain: impl Into<String>,
        address: impl Into<String>,
        statement: impl Into<String>,
        uri: impl Into<String>,
        chain_id: u64,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            address: address.into(),
            statement: statement.into(),
            uri: uri.into(),
            chain_id,
            nonce: nonce.into(),
            issued_at: Utc::now(),
        }
    }

    /// Render the message text presented to the wallet for signing
    pub fn prepare(&self) -> String {
        format!(
            "{domain} wants you to sign in with your Ethereum account:\n\
             {address}\n\
             \n\
             {statement}\n\
             \n\
             URI: {uri}\n\
             Version: 1\n\
             Chain ID: {chain_id}\n\
             Nonce: {nonce}\n\
             Issued At: {issued_at}",
            domain = self.domain,
            address = self.address,
            statement = self.statement,
            uri = self.uri,
            chain_id = self.chain_id,
            nonce = self.nonce,
            issued_at = self.issued_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}

/// Verify endpoint request body
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub message: String,
    pub signature: String,
}

/// Server auth endpoints (nonce, verify, logout)
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Fetch a single-use nonce
    async fn nonce(&self) -> FolioResult<String>;

    /// Submit the signed message; establishes the session cookie on success
    async fn verify(&self, message: &str, signature: &str) -> FolioResult<()>;

    /// Destroy the server-side session cookie
    async fn logout(&self) -> FolioResult<()>;
}

/// HTTP implementation against the dashboard backend.
///
/// The underlying client keeps a cookie store so the session cookie set
/// by the verify endpoint rides along on later cache requests.
pub struct HttpAuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthClient {
    /// Create a client; `client` must have a cookie store enabled
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn nonce(&self) -> FolioResult<String> {
        let url = format!("{}/api/siwe/nonce", self.base_url);
        debug!("Fetching sign-in nonce from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FolioError::Authentication(format!(
                "Nonce endpoint returned {}",
                response.status()
            )));
        }

        let nonce = response.text().await?;
        if nonce.trim().is_empty() {
            return Err(FolioError::Authentication("Empty nonce".to_string()));
        }
        Ok(nonce.trim().to_string())
    }

    async fn verify(&self, message: &str, signature: &str) -> FolioResult<()> {
        let url = format!("{}/api/siwe/verify", self.base_url);
        debug!("Submitting signed message to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&VerifyRequest {
                message: message.to_string(),
                signature: signature.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FolioError::Verification(format!(
                "Verify endpoint returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn logout(&self) -> FolioResult<()> {
        let url = format!("{}/api/siwe/logout", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FolioError::Authentication(format!(
                "Logout endpoint returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_layout() {
        let message = SignInMessage::new(
            "dash.example.com",
            "0xABC",
            "Sign in to your portfolio dashboard",
            "https://dash.example.com",
            1,
            "n0nce123",
        );
        let text = message.prepare();

        assert!(text.starts_with(
            "dash.example.com wants you to sign in with your Ethereum account:\n0xABC\n"
        ));
        assert!(text.contains("\nSign in to your portfolio dashboard\n"));
        assert!(text.contains("\nVersion: 1\n"));
        assert!(text.contains("\nChain ID: 1\n"));
        assert!(text.contains("\nNonce: n0nce123\n"));
        assert!(text.contains("\nIssued At: "));
    }
}
