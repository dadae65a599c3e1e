//! Configuration loading for the admin client.
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration. `PORTFOLIO_API_URL` overrides the base URL after the file is read.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_ADMIN_CONFIG";
pub const API_URL_ENV: &str = "PORTFOLIO_API_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    /// Mailbox size of each collection actor.
    pub channel_capacity: usize,
    pub login_path: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            request_timeout_ms: 30_000,
            channel_capacity: 32,
            login_path: "/login".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl AdminConfig {
    /// File named by `PORTFOLIO_ADMIN_CONFIG` (defaults when unset), then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::parse(&std::fs::read_to_string(Path::new(&path))?)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "channel_capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "login_path",
                reason: "must be an absolute path".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
