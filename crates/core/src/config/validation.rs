//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `bind_addr` is not a parseable socket address
    /// - `search_ttl_secs` is 0
    /// - `image_max_bytes` is 0 or exceeds 16MB
    /// - either timeout is under 100ms or over 60s
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "bind_addr".into(),
                reason: "must be a socket address like 0.0.0.0:5000".into(),
            });
        }

        if self.search_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "search_ttl_secs".into(), reason: "must be greater than 0".into() });
        }

        if self.image_max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "image_max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.image_max_bytes > 16 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "image_max_bytes".into(), reason: "must not exceed 16MB".into() });
        }

        for (field, value) in [
            ("provider_timeout_ms", self.provider_timeout_ms),
            ("image_timeout_ms", self.image_timeout_ms),
        ] {
            if value < 100 {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must be at least 100ms".into() });
            }
            if value > 60_000 {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must not exceed 60 seconds".into() });
            }
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_bind_addr() {
        let config = AppConfig { bind_addr: "not-an-addr".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bind_addr"));
    }

    #[test]
    fn test_validate_zero_ttl() {
        let config = AppConfig { search_ttl_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "search_ttl_secs"));
    }

    #[test]
    fn test_validate_image_max_bytes_zero() {
        let config = AppConfig { image_max_bytes: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "image_max_bytes"));
    }

    #[test]
    fn test_validate_image_max_bytes_exceeds_limit() {
        let config = AppConfig { image_max_bytes: 17 * 1024 * 1024, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "image_max_bytes"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { image_timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "image_timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { provider_timeout_ms: 61_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "provider_timeout_ms"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig {
            search_ttl_secs: 1,
            provider_timeout_ms: 100,
            image_max_bytes: 1,
            image_timeout_ms: 100,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
