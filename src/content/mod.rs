/// Content-addressed storage client
///
/// Uploads go through the backend's pinning proxy endpoints; fetches go
/// either straight to a public gateway or through the backend's
/// same-origin resolving proxy, selected by configuration.
pub mod memory;

pub use memory::MemoryContentStore;

use crate::config::GatewayConfig;
use crate::error::{FolioError, FolioResult};
use crate::profile::ProfileDocument;
use async_trait::async_trait;
use libipld::Cid;
use serde::Deserialize;
use tracing::debug;

/// Build the canonical `ipfs://` URI for a content identifier
pub fn cid_uri(cid: &str) -> String {
    format!("ipfs://{}", cid)
}

/// Parse and validate a content identifier string
pub fn parse_cid(value: &str) -> FolioResult<Cid> {
    Cid::try_from(value)
        .map_err(|e| FolioError::Upload(format!("Invalid content identifier {:?}: {}", value, e)))
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Upload a binary file, returning its content identifier
    async fn upload_file(
        &self,
        data: Vec<u8>,
        mime_type: &str,
        file_name: Option<&str>,
    ) -> FolioResult<String>;

    /// Upload a profile document as JSON, returning its content identifier
    async fn upload_json(&self, document: &ProfileDocument) -> FolioResult<String>;

    /// Fetch and parse a profile document by content identifier
    async fn fetch_document(&self, cid: &str) -> FolioResult<ProfileDocument>;
}

/// Upload endpoint response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    ipfs_hash: String,
}

/// HTTP implementation against the backend upload proxy and a gateway
pub struct HttpContentStore {
    client: reqwest::Client,
    base_url: String,
    gateway: GatewayConfig,
}

impl HttpContentStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, gateway: GatewayConfig) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            gateway,
        }
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn upload_file(
        &self,
        data: Vec<u8>,
        mime_type: &str,
        file_name: Option<&str>,
    ) -> FolioResult<String> {
        let url = format!("{}/api/upload", self.base_url);
        debug!("Uploading {} bytes ({}) to {}", data.len(), mime_type, url);

        let mut part = reqwest::multipart::Part::bytes(data)
            .mime_str(mime_type)
            .map_err(|e| FolioError::Upload(format!("Invalid mime type {}: {}", mime_type, e)))?;
        if let Some(name) = file_name {
            part = part.file_name(name.to_string());
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(FolioError::Upload(format!(
                "Upload endpoint returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response.json().await?;
        parse_cid(&body.ipfs_hash)?;
        Ok(body.ipfs_hash)
    }

    async fn upload_json(&self, document: &ProfileDocument) -> FolioResult<String> {
        let url = format!("{}/api/upload-json", self.base_url);
        debug!("Uploading profile document to {}", url);

        let response = self.client.post(&url).json(document).send().await?;
        if !response.status().is_success() {
            return Err(FolioError::Upload(format!(
                "JSON upload endpoint returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response.json().await?;
        parse_cid(&body.ipfs_hash)?;
        Ok(body.ipfs_hash)
    }

    async fn fetch_document(&self, cid: &str) -> FolioResult<ProfileDocument> {
        let request = match &self.gateway {
            GatewayConfig::Direct { url } => {
                let target = format!("{}/ipfs/{}", url.trim_end_matches('/'), cid);
                debug!("Fetching document from gateway {}", target);
                self.client.get(target)
            }
            GatewayConfig::Proxy => {
                let target = format!("{}/api/proxy-json", self.base_url);
                debug!("Fetching document through proxy for {}", cid);
                self.client.get(target).query(&[("cid", cid)])
            }
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FolioError::ContentFetch(format!(
                "Fetch for {} returned {}",
                cid,
                response.status()
            )));
        }

        let document = response.json::<ProfileDocument>().await?;
        Ok(document)
    }
}
