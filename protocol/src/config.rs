//! # Client Configuration & Constants
//!
//! Every constant the signing path depends on lives here, next to the
//! [`ClientConfig`] that the HTTP client and the CLI load at startup.
//!
//! Changing anything in the first two sections changes the bytes that get
//! signed. Verifiers on the other side will reject the result.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transaction::types::SignatureType;

// ---------------------------------------------------------------------------
// Signing Parameters
// ---------------------------------------------------------------------------

/// Salt length in bytes. Fresh for every signing attempt.
pub const SALT_LENGTH: usize = 16;

/// Signature type attached when the signer does not report its own.
pub const DEFAULT_SIGNATURE_TYPE: SignatureType = SignatureType::Secp256k1Personal;

// ---------------------------------------------------------------------------
// Remote Contract
// ---------------------------------------------------------------------------

/// The only status an account lookup or fee estimate may report to count
/// as a success.
pub const SUCCESS_STATUS: u16 = 200;

/// Path of the JSON-RPC endpoint relative to the provider URL.
pub const RPC_PATH: &str = "/rpc/v1";

/// JSON-RPC method for account state.
pub const METHOD_ACCOUNT: &str = "user.account";

/// JSON-RPC method for fee estimation.
pub const METHOD_ESTIMATE_PRICE: &str = "user.estimate_price";

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Provider used when none is configured. A local devnet node.
pub const DEFAULT_PROVIDER: &str = "http://localhost:8484";

/// Request timeout applied by the HTTP transport. The builder itself never
/// times out; cancellation belongs to the transport.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default `tracing` filter directive for the CLI.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Connection settings for a Kwil provider.
///
/// Loaded from a JSON file; every field is optional and falls back to the
/// defaults above.
///
/// ```json
/// { "provider": "https://node.example:8484", "timeout_ms": 5000, "log_level": "debug" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the provider node, without the RPC path.
    pub provider: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `provider`, defaults elsewhere.
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full JSON-RPC endpoint URL.
    pub fn rpc_url(&self) -> String {
        format!("{}{}", self.provider.trim_end_matches('/'), RPC_PATH)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.provider.starts_with("http://") || self.provider.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "provider must be an http(s) URL, got {:?}",
                self.provider
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn rpc_url_joins_without_double_slash() {
        let config = ClientConfig::new("https://node.example:8484/");
        assert_eq!(config.rpc_url(), "https://node.example:8484/rpc/v1");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = ClientConfig::from_json_str(r#"{"provider": "https://a.b"}"#).unwrap();
        assert_eq!(config.provider, "https://a.b");
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn rejects_non_http_provider() {
        let err = ClientConfig::from_json_str(r#"{"provider": "ftp://x"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientConfig::from_json_str(r#"{"timeout_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ClientConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn salt_length_is_sixteen() {
        assert_eq!(SALT_LENGTH, 16);
    }
}
