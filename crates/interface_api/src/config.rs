//! API configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use domain_fund::adapters::UpstreamConfig;

/// API configuration
///
/// Every field can be set through a `TRACKER_`-prefixed environment variable,
/// e.g. `TRACKER_UPSTREAM_BASE_URL`. Unset fields keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL of the upstream fund service
    pub upstream_base_url: String,
    /// Bound on each upstream call including retries, in seconds
    pub upstream_timeout_secs: u64,
    /// Retries for transient upstream failures
    pub upstream_retries: u32,
    /// When false, only the bundled dataset is served
    pub use_upstream: bool,
    /// Directory holding persisted notes
    pub notes_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            upstream_base_url: "http://localhost:5000".to_string(),
            upstream_timeout_secs: 10,
            upstream_retries: 2,
            use_upstream: true,
            notes_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("TRACKER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Connection settings for the upstream adapter
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.upstream_base_url.clone(),
            timeout: self.upstream_timeout(),
            max_retries: self.upstream_retries,
        }
    }
}
