use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub server: ServerConfig,
    /// PostgreSQL connection URL for the ledger store
    pub database_url: String,
    #[serde(default)]
    pub processor: ProcessorConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Payment processor connection settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProcessorConfig {
    pub base_url: String,
    pub api_key: String,
    /// Outbound call timeout. On expiry the transaction is left pending,
    /// never assumed failed.
    pub timeout_ms: u64,
    /// Use the in-process mock instead of the HTTP client (dev/test).
    pub use_mock: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://integrations.example-processor.test".to_string(),
            api_key: String::new(),
            timeout_ms: 10_000,
            use_mock: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WebhookConfig {
    /// Shared secret for the processor's event signatures.
    pub secret: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: "dev-webhook-secret".to_string(),
        }
    }
}

/// Stale-pending sweep settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReconciliationConfig {
    pub sweep_interval_secs: u64,
    /// A pending transaction older than this requires reconciliation.
    pub pending_horizon_secs: u64,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 300,
            pending_horizon_secs: 1800,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let yaml = r#"
log_level: "debug"
log_dir: "logs"
log_file: "test.log"
use_json: false
rotation: "never"
server:
  host: "127.0.0.1"
  port: 9090
database_url: "postgresql://localhost/walletd_test"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.processor.use_mock);
        assert_eq!(config.reconciliation.pending_horizon_secs, 1800);
        assert_eq!(config.server.port, 9090);
    }
}
