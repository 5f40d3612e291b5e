//! Service configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use waqt_network::DEFAULT_BASE_URL;
use waqt_types::WaqtError;

pub const ENV_DATA_DIR: &str = "WAQT_DATA_DIR";
pub const ENV_REMOTE_URL: &str = "WAQT_REMOTE_URL";
pub const ENV_REMOTE_TIMEOUT_SECS: &str = "WAQT_REMOTE_TIMEOUT_SECS";
pub const ENV_CACHE_TABLES: &str = "WAQT_CACHE_TABLES";

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_remote_url() -> Option<String> {
    Some(DEFAULT_BASE_URL.to_string())
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_tables() -> bool {
    true
}

/// Settings for a [`crate::PrayerService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Dataset root holding one directory per country code.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Remote timings API. `None` disables the remote fallback.
    #[serde(default = "default_remote_url")]
    pub remote_url: Option<String>,
    /// Request timeout in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub remote_timeout_secs: u64,
    /// Keep parsed tables in memory, keyed by file path.
    #[serde(default = "default_cache_tables")]
    pub cache_tables: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            remote_url: default_remote_url(),
            remote_timeout_secs: default_timeout_secs(),
            cache_tables: default_cache_tables(),
        }
    }
}

impl std::str::FromStr for ServiceConfig {
    type Err = WaqtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| WaqtError::invalid_input(format!("config JSON: {}", e)))
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    pub fn without_remote(mut self) -> Self {
        self.remote_url = None;
        self
    }

    pub fn with_remote_timeout_secs(mut self, secs: u64) -> Self {
        self.remote_timeout_secs = secs;
        self
    }

    pub fn with_cache_tables(mut self, on: bool) -> Self {
        self.cache_tables = on;
        self
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    /// Reads `WAQT_*` environment variables over the defaults.
    ///
    /// An empty `WAQT_REMOTE_URL` disables the remote fallback.
    #[instrument]
    pub fn from_env() -> Result<Self, WaqtError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ServiceConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WaqtError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            debug!(dir = %dir, "data directory from environment");
            config.data_dir = PathBuf::from(dir.trim());
        }

        if let Some(url) = lookup(ENV_REMOTE_URL) {
            let url = url.trim();
            config.remote_url = (!url.is_empty()).then(|| url.to_string());
            debug!(remote_url = ?config.remote_url, "remote URL from environment");
        }

        if let Some(raw) = lookup(ENV_REMOTE_TIMEOUT_SECS) {
            config.remote_timeout_secs = raw.trim().parse().map_err(|_| {
                WaqtError::invalid_input(format!("{} must be a whole number of seconds, got {:?}", ENV_REMOTE_TIMEOUT_SECS, raw))
            })?;
        }

        if let Some(raw) = lookup(ENV_CACHE_TABLES) {
            config.cache_tables = parse_flag(&raw).ok_or_else(|| {
                WaqtError::invalid_input(format!("{} must be true or false, got {:?}", ENV_CACHE_TABLES, raw))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
