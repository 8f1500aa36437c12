//! Availability endpoint configuration

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Availability endpoint configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AvailabilityConfig {
    /// Endpoint queried with `?userName=<value>`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after a server error
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, doubled for each further one
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
}

impl AvailabilityConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get initial backoff as Duration
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Validate availability configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::MissingRequired("availability.endpoint"));
        }

        let url = Url::parse(&self.endpoint).map_err(|_| ValidationError::InvalidEndpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidEndpoint);
        }

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        if self.max_retries > 20 {
            return Err(ValidationError::TooManyRetries);
        }

        if self.initial_backoff_ms == 0 {
            return Err(ValidationError::InvalidBackoff);
        }

        Ok(())
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            initial_backoff_ms: default_initial_backoff(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/isUserNameAvailable".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    10
}

fn default_initial_backoff() -> u64 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_config_defaults() {
        let config = AvailabilityConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/isUserNameAvailable");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries, 10);
        assert_eq!(config.initial_backoff(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_endpoint() {
        let config = AvailabilityConfig {
            endpoint: "ftp://example.com/names".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidEndpoint));

        let config = AvailabilityConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidEndpoint));
    }

    #[test]
    fn test_validation_missing_endpoint() {
        let config = AvailabilityConfig {
            endpoint: String::new(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("availability.endpoint"))
        );
    }

    #[test]
    fn test_validation_limits() {
        let config = AvailabilityConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));

        let config = AvailabilityConfig {
            max_retries: 21,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::TooManyRetries));

        let config = AvailabilityConfig {
            initial_backoff_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBackoff));
    }
}
