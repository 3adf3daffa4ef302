/// Media references: published content-addressed URIs vs. pending payloads
use crate::error::{FolioError, FolioResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// A media field on the profile document.
///
/// `Published` holds a content-addressed `ipfs://` URI; `Pending` holds a
/// base64 payload that has not been uploaded yet. A published document
/// must contain no `Pending` references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum MediaRef {
    Published {
        uri: String,
    },
    #[serde(rename_all = "camelCase")]
    Pending {
        /// Base64-encoded file contents
        data: String,
        mime_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
    },
}

impl MediaRef {
    /// Wrap an already-published content identifier
    pub fn published(uri: impl Into<String>) -> Self {
        MediaRef::Published { uri: uri.into() }
    }

    /// Create a pending reference from raw bytes
    pub fn pending_bytes(data: &[u8], mime_type: impl Into<String>, file_name: Option<String>) -> Self {
        MediaRef::Pending {
            data: BASE64.encode(data),
            mime_type: mime_type.into(),
            file_name,
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI into a pending reference
    pub fn from_data_uri(uri: &str, file_name: Option<String>) -> FolioResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| FolioError::Validation("Not a data URI".to_string()))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| FolioError::Validation("Data URI is not base64-encoded".to_string()))?;

        Ok(MediaRef::Pending {
            data: payload.to_string(),
            mime_type: mime_type.to_string(),
            file_name,
        })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MediaRef::Pending { .. })
    }

    /// Decode the pending payload into raw bytes.
    ///
    /// Errors on published references and on malformed base64.
    pub fn decode_payload(&self) -> FolioResult<Vec<u8>> {
        match self {
            MediaRef::Published { .. } => Err(FolioError::Validation(
                "Media is already published, nothing to decode".to_string(),
            )),
            MediaRef::Pending { data, .. } => BASE64
                .decode(data.as_bytes())
                .map_err(|e| FolioError::Validation(format!("Invalid media payload: {}", e))),
        }
    }
}
