//! Steward Configuration System
//!
//! TOML-based configuration with environment variable override support.
//! Every component receives the values it needs at construction; nothing
//! reads process-wide state after loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub uaa: UaaConfig,
}

/// Cloud controller (resource-hierarchy backend) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. "https://api.example.com"
    pub url: String,
    /// Pre-issued bearer token; acquiring and refreshing it happens elsewhere
    pub access_token: String,
    pub timeout_secs: u64,
    /// Total attempts for idempotent requests (1 disables retries)
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            access_token: String::new(),
            timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 100,
            user_agent: format!("steward/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Identity backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UaaConfig {
    /// Base URL; empty means the endpoint is unknown
    pub url: String,
    /// Token for the identity backend; falls back to `api.access_token` when empty
    pub access_token: String,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new();
        loader.load()
    }

    /// Check the values every component relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.url must be set".to_string(),
            ));
        }
        if self.api.retry_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "api.retry_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Token used against the identity backend
    pub fn uaa_access_token(&self) -> &str {
        if self.uaa.access_token.is_empty() {
            &self.api.access_token
        } else {
            &self.uaa.access_token
        }
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Steward Configuration
# Environment variables override these settings

[api]
url = "https://api.example.com"
access_token = ""
timeout_secs = 30
retry_attempts = 3
retry_delay_ms = 100

[uaa]
url = "https://uaa.example.com"
access_token = ""  # empty: reuse api.access_token
"#
        .to_string()
    }
}
