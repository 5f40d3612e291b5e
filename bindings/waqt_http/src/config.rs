use serde::{Deserialize, Serialize};
use waqt_core::{ServiceConfig, WaqtError};

pub const ENV_HOST: &str = "WAQT_HOST";
pub const ENV_PORT: &str = "WAQT_PORT";

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Listener settings plus the service they front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), service: ServiceConfig::default() }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, WaqtError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WaqtError> {
        let service = ServiceConfig::from_lookup(&lookup)?;
        let host = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()).unwrap_or_else(default_host);
        let port = match lookup(ENV_PORT) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                WaqtError::invalid_input(format!("{} must be a port number, got {:?}", ENV_PORT, raw))
            })?,
            None => default_port(),
        };
        Ok(Self { host: host.trim().to_string(), port, service })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.service, ServiceConfig::default());
    }

    #[test]
    fn test_env_values() {
        let config = ServerConfig::from_lookup(|key| match key {
            ENV_HOST => Some("0.0.0.0".into()),
            ENV_PORT => Some("9000".into()),
            "WAQT_DATA_DIR" => Some("/data".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 9000));
        assert_eq!(config.service.data_dir, std::path::PathBuf::from("/data"));
        assert!(ServerConfig::from_lookup(|key| (key == ENV_PORT).then(|| "http".into())).is_err());
    }
}
