//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SHELFMARK_*)
//! 2. TOML config file (if SHELFMARK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SHELFMARK_*)
/// 2. TOML config file (if SHELFMARK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    ///
    /// Set via SHELFMARK_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// TMDB API key for movie and TV search.
    ///
    /// Set via SHELFMARK_TMDB_API_KEY environment variable.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Google Books API key. The volumes endpoint works without one, so this
    /// is optional and only appended to requests when present.
    ///
    /// Set via SHELFMARK_BOOKS_API_KEY environment variable.
    #[serde(default)]
    pub books_api_key: Option<String>,

    /// RAWG API key for game search.
    ///
    /// Set via SHELFMARK_RAWG_API_KEY environment variable.
    #[serde(default)]
    pub rawg_api_key: Option<String>,

    /// User-Agent string for upstream HTTP requests.
    ///
    /// Set via SHELFMARK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How long normalized search responses stay cached, in seconds.
    ///
    /// Set via SHELFMARK_SEARCH_TTL_SECS environment variable.
    #[serde(default = "default_search_ttl_secs")]
    pub search_ttl_secs: u64,

    /// Timeout for provider search requests in milliseconds.
    ///
    /// Set via SHELFMARK_PROVIDER_TIMEOUT_MS environment variable.
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,

    /// Maximum bytes relayed per proxied image.
    ///
    /// Set via SHELFMARK_IMAGE_MAX_BYTES environment variable.
    #[serde(default = "default_image_max_bytes")]
    pub image_max_bytes: usize,

    /// Timeout for upstream image fetches in milliseconds.
    ///
    /// Set via SHELFMARK_IMAGE_TIMEOUT_MS environment variable.
    #[serde(default = "default_image_timeout_ms")]
    pub image_timeout_ms: u64,

    /// Maximum redirects followed on an image fetch.
    ///
    /// Set via SHELFMARK_IMAGE_MAX_REDIRECTS environment variable.
    #[serde(default = "default_image_max_redirects")]
    pub image_max_redirects: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".into()
}

fn default_user_agent() -> String {
    "shelfmark/0.1".into()
}

fn default_search_ttl_secs() -> u64 {
    300
}

fn default_provider_timeout_ms() -> u64 {
    10_000
}

fn default_image_max_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_image_timeout_ms() -> u64 {
    7_000
}

fn default_image_max_redirects() -> usize {
    3
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            tmdb_api_key: None,
            books_api_key: None,
            rawg_api_key: None,
            user_agent: default_user_agent(),
            search_ttl_secs: default_search_ttl_secs(),
            provider_timeout_ms: default_provider_timeout_ms(),
            image_max_bytes: default_image_max_bytes(),
            image_timeout_ms: default_image_timeout_ms(),
            image_max_redirects: default_image_max_redirects(),
        }
    }
}

impl AppConfig {
    /// Search cache TTL as a chrono duration for expiry stamping.
    pub fn search_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.search_ttl_secs as i64)
    }

    /// Provider request timeout for use with reqwest.
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Image fetch timeout for use with reqwest.
    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SHELFMARK_`
    /// 2. TOML file from `SHELFMARK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SHELFMARK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SHELFMARK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check that the TMDB API key is available.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_tmdb_api_key(&self) -> Result<&str, ConfigError> {
        self.tmdb_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "tmdb_api_key".into(),
            hint: "Set SHELFMARK_TMDB_API_KEY environment variable".into(),
        })
    }

    /// Check that the RAWG API key is available.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_rawg_api_key(&self) -> Result<&str, ConfigError> {
        self.rawg_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "rawg_api_key".into(),
            hint: "Set SHELFMARK_RAWG_API_KEY environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.user_agent, "shelfmark/0.1");
        assert_eq!(config.search_ttl_secs, 300);
        assert_eq!(config.provider_timeout_ms, 10_000);
        assert_eq!(config.image_max_bytes, 2 * 1024 * 1024);
        assert_eq!(config.image_timeout_ms, 7_000);
        assert_eq!(config.image_max_redirects, 3);
        assert!(config.tmdb_api_key.is_none());
        assert!(config.books_api_key.is_none());
        assert!(config.rawg_api_key.is_none());
    }

    #[test]
    fn test_duration_accessors() {
        let config = AppConfig::default();
        assert_eq!(config.search_ttl(), chrono::Duration::seconds(300));
        assert_eq!(config.provider_timeout(), Duration::from_millis(10_000));
        assert_eq!(config.image_timeout(), Duration::from_millis(7_000));
    }

    #[test]
    fn test_require_tmdb_api_key_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.require_tmdb_api_key(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_tmdb_api_key_present() {
        let config = AppConfig { tmdb_api_key: Some("test-key".into()), ..Default::default() };
        assert_eq!(config.require_tmdb_api_key().unwrap(), "test-key");
    }

    #[test]
    fn test_require_rawg_api_key_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.require_rawg_api_key(), Err(ConfigError::Missing { .. })));
    }
}
