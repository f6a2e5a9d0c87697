//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "steward.toml",
    "config.toml",
    "./config/steward.toml",
    "/etc/steward/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) but reads overrides through `lookup`
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file(&lookup) {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        apply_overrides(&mut config, &lookup)?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file<F>(&self, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        if let Some(path) = lookup("STEWARD_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvError(format!("{} has invalid value '{}'", key, val))),
        None => Ok(None),
    }
}

fn apply_overrides<F>(config: &mut AppConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Cloud controller
    if let Some(val) = lookup("STEWARD_API_URL") {
        config.api.url = val;
    }
    if let Some(val) = lookup("STEWARD_ACCESS_TOKEN") {
        config.api.access_token = val;
    }
    if let Some(secs) = parse_var(lookup, "STEWARD_API_TIMEOUT_SECS")? {
        config.api.timeout_secs = secs;
    }
    if let Some(attempts) = parse_var(lookup, "STEWARD_RETRY_ATTEMPTS")? {
        config.api.retry_attempts = attempts;
    }
    if let Some(delay) = parse_var(lookup, "STEWARD_RETRY_DELAY_MS")? {
        config.api.retry_delay_ms = delay;
    }

    // Identity backend
    if let Some(val) = lookup("STEWARD_UAA_URL") {
        config.uaa.url = val;
    }
    if let Some(val) = lookup("STEWARD_UAA_ACCESS_TOKEN") {
        config.uaa.access_token = val;
    }

    Ok(())
}
