/// Configuration management for the chainfolio dashboard
use crate::error::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub gateway: GatewayConfig,
    pub registry: RegistryConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Application server endpoints (sign-in, uploads, profile cache)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dashboard backend, e.g. "https://dash.example.com"
    pub base_url: String,

    /// Domain embedded in the sign-in message
    pub domain: String,

    /// Human-readable statement shown in the wallet signing prompt
    pub statement: String,
}

/// Content-addressed fetch path selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GatewayConfig {
    /// Fetch directly from a public gateway
    Direct { url: String },

    /// Fetch through the backend's same-origin resolving proxy
    Proxy,
}

/// Smart-contract pointer registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Address of the profile registry contract
    pub contract_address: String,

    /// Chain the registry lives on
    pub chain_id: u64,
}

/// Durable draft storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub draft_directory: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> FolioResult<Self> {
        dotenv::dotenv().ok();

        let base_url = env::var("FOLIO_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let domain = env::var("FOLIO_DOMAIN").unwrap_or_else(|_| {
            base_url
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .to_string()
        });
        let statement = env::var("FOLIO_SIGNIN_STATEMENT")
            .unwrap_or_else(|_| "Sign in to your portfolio dashboard".to_string());

        let gateway = if env::var("FOLIO_GATEWAY_PROXY")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
        {
            GatewayConfig::Proxy
        } else {
            GatewayConfig::Direct {
                url: env::var("FOLIO_GATEWAY_URL")
                    .unwrap_or_else(|_| "https://gateway.ipfs.io".to_string()),
            }
        };

        let contract_address = env::var("FOLIO_REGISTRY_ADDRESS")
            .map_err(|_| FolioError::Validation("Registry contract address required".to_string()))?;
        let chain_id = env::var("FOLIO_CHAIN_ID")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|_| FolioError::Validation("Invalid chain id".to_string()))?;

        let draft_directory: PathBuf = env::var("FOLIO_DRAFT_DIRECTORY")
            .unwrap_or_else(|_| "./data/drafts".to_string())
            .into();

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(DashboardConfig {
            api: ApiConfig {
                base_url,
                domain,
                statement,
            },
            gateway,
            registry: RegistryConfig {
                contract_address,
                chain_id,
            },
            storage: StorageConfig { draft_directory },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> FolioResult<()> {
        if self.api.base_url.is_empty() {
            return Err(FolioError::Validation(
                "API base URL cannot be empty".to_string(),
            ));
        }

        let address = &self.registry.contract_address;
        if !address.starts_with("0x") || address.len() != 42 {
            return Err(FolioError::Validation(
                "Registry contract address must be a 0x-prefixed 20-byte hex string".to_string(),
            ));
        }

        if let GatewayConfig::Direct { url } = &self.gateway {
            if url.is_empty() {
                return Err(FolioError::Validation(
                    "Gateway URL cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DashboardConfig {
        DashboardConfig {
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                domain: "localhost:3000".to_string(),
                statement: "Sign in".to_string(),
            },
            gateway: GatewayConfig::Direct {
                url: "https://gateway.ipfs.io".to_string(),
            },
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

    #[test]
    fn test_validate_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_contract_address() {
        let mut config = test_config();
        config.registry.contract_address = "not-an-address".to_string();
        assert!(config.validate().is_err());

        config.registry.contract_address = "0x1234".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_gateway() {
        let mut config = test_config();
        config.gateway = GatewayConfig::Direct { url: String::new() };
        assert!(config.validate().is_err());
    }
}
