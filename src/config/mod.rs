use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Configuration compiled into the bundle. A browser build has no file
/// system or process environment, so the TOML document ships with the wasm.
const EMBEDDED_CONFIG: &str = include_str!("../../truestake.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listings: ListingsConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Market API base URL, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Re-query `/auth/me` after platform sign-in to pick up the
    /// authoritative role.
    #[serde(default = "default_true")]
    pub refine_role: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ListingsConfig {
    /// Unconditional re-fetch interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,
    /// Quiet period after the last keystroke before a search fetch.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u32,
    /// Trimmed search text shorter than this is not sent.
    #[serde(default = "default_min_search_len")]
    pub min_search_len: usize,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CategoriesConfig {
    /// Category keys hidden from the category bar.
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// localStorage key holding the session token.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "https://api.corsarinc.ru".to_string()
}
fn default_true() -> bool {
    true
}
fn default_poll_interval_ms() -> u32 {
    15_000
}
fn default_search_debounce_ms() -> u32 {
    400
}
fn default_min_search_len() -> usize {
    1
}
fn default_storage_key() -> String {
    "ts_token".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refine_role: true,
        }
    }
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            min_search_len: default_min_search_len(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            listings: ListingsConfig::default(),
            categories: CategoriesConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(contents)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration shipped with the bundle, falling back to
    /// defaults when it does not parse.
    pub fn embedded() -> Self {
        match Self::from_toml_str(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "embedded config rejected, using defaults");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Invalid {
                field: "api.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.listings.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "listings.poll_interval_ms",
                reason: "must be positive".to_string(),
            });
        }
        if self.session.storage_key.is_empty() {
            return Err(ConfigError::Invalid {
                field: "session.storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Parsed log level; unknown names fall back to INFO.
    pub fn log_level(&self) -> tracing::Level {
        self.logging
            .level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::from_toml_str(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "https://api.corsarinc.ru");
        assert_eq!(config.listings.poll_interval_ms, 15_000);
        assert_eq!(config.listings.search_debounce_ms, 400);
        assert_eq!(config.session.storage_key, "ts_token");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.api.refine_role);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::from_toml_str("[api]\nbase_url = \"http://localhost:8080/\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let err = AppConfig::from_toml_str("[listings]\npoll_interval_ms = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "listings.poll_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_log_level() {
        let config = AppConfig::from_toml_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
        let config = AppConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }
}
