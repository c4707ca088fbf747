//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::RpcError;

/// Configuration for the fundpool service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Port the RPC server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Owner address — the only identity allowed to withdraw.
    /// The zero-address default is a dev placeholder; deployments set this.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Minimum accepted contribution value in whole USD.
    #[serde(default = "default_minimum_usd")]
    pub minimum_usd: u64,

    /// Base URL of the price feed relay.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Request timeout for price lookups, in seconds.
    #[serde(default = "default_feed_timeout_secs")]
    pub feed_timeout_secs: u64,

    /// Whether to serve permissive CORS headers (browser front-ends).
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_port() -> u16 {
    7070
}

fn default_owner() -> String {
    format!("0x{}", "0".repeat(40))
}

fn default_minimum_usd() -> u64 {
    50
}

fn default_feed_url() -> String {
    "http://127.0.0.1:7071".to_string()
}

fn default_feed_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, RpcError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RpcError::Server(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RpcError> {
        toml::from_str(s).map_err(|e| RpcError::Server(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ServiceConfig is always serializable to TOML")
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            owner: default_owner(),
            minimum_usd: default_minimum_usd(),
            feed_url: default_feed_url(),
            feed_timeout_secs: default_feed_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ServiceConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = ServiceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.listen_port, config.listen_port);
        assert_eq!(parsed.minimum_usd, config.minimum_usd);
        assert_eq!(parsed.feed_url, config.feed_url);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.listen_port, 7070);
        assert_eq!(config.minimum_usd, 50);
        assert_eq!(config.feed_timeout_secs, 10);
        assert!(config.enable_cors);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            listen_port = 9999
            minimum_usd = 25
        "#;
        let config = ServiceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.listen_port, 9999);
        assert_eq!(config.minimum_usd, 25);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn missing_file_returns_error() {
        let result = ServiceConfig::from_toml_file("/nonexistent/fundpool.toml");
        assert!(result.is_err());
    }
}
