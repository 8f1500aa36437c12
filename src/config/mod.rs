//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! (and optionally a config file) using the `config` and `dotenvy` crates.
//! Configuration is loaded with the `SIGNUP_FORM` prefix and nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use signup_form::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Checking names against {}", config.availability.endpoint);
//! ```

mod availability;
mod error;
mod form;
mod telemetry;

pub use availability::AvailabilityConfig;
pub use error::{ConfigError, ValidationError};
pub use form::FormConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "SIGNUP_FORM";
const ENV_SEPARATOR: &str = "__";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration pointing at a local availability endpoint.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Availability endpoint, timeout and retry policy
    #[serde(default)]
    pub availability: AvailabilityConfig,

    /// Debounce period and minimum field lengths
    #[serde(default)]
    pub form: FormConfig,

    /// Log filter and format
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SIGNUP_FORM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SIGNUP_FORM__AVAILABILITY__ENDPOINT=...` -> `availability.endpoint = ...`
    /// - `SIGNUP_FORM__FORM__DEBOUNCE_MS=500` -> `form.debounce_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, overridden by environment variables
    ///
    /// The file format (TOML, YAML, JSON, ...) is chosen by its extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed, or if values
    /// cannot be parsed into expected types.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.availability.validate()?;
        self.form.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "SIGNUP_FORM__AVAILABILITY__ENDPOINT",
        "SIGNUP_FORM__AVAILABILITY__MAX_RETRIES",
        "SIGNUP_FORM__FORM__DEBOUNCE_MS",
        "SIGNUP_FORM__TELEMETRY__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn config_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var(
            "SIGNUP_FORM__AVAILABILITY__ENDPOINT",
            "https://api.example.com/isUserNameAvailable",
        );
        env::set_var("SIGNUP_FORM__AVAILABILITY__MAX_RETRIES", "4");
        env::set_var("SIGNUP_FORM__FORM__DEBOUNCE_MS", "500");
        env::set_var("SIGNUP_FORM__TELEMETRY__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.availability.endpoint,
            "https://api.example.com/isUserNameAvailable"
        );
        assert_eq!(config.availability.max_retries, 4);
        assert_eq!(config.form.debounce(), Duration::from_millis(500));
        assert!(config.telemetry.json);
        assert_eq!(config.form.min_username_length, 3);
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = config_file(
            ".toml",
            r#"
[availability]
endpoint = "https://names.example.com/check"
initial_backoff_ms = 250

[form]
min_password_length = 12
"#,
        );

        let config = AppConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.availability.endpoint, "https://names.example.com/check");
        assert_eq!(config.availability.initial_backoff(), Duration::from_millis(250));
        assert_eq!(config.availability.max_retries, 10);
        assert_eq!(config.form.min_password_length, 12);
        assert_eq!(config.telemetry, TelemetryConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let file = config_file(".json", r#"{"form": {"debounce_ms": 300}}"#);
        env::set_var("SIGNUP_FORM__FORM__DEBOUNCE_MS", "600");
        let result = AppConfig::load_from_file(file.path());
        clear_env();

        assert_eq!(result.unwrap().form.debounce_ms, 600);
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = AppConfig::load_from_file("/nonexistent/signup-form.toml");
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_reports_first_invalid_section() {
        let config = AppConfig {
            form: FormConfig {
                debounce_ms: 60_000,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDebounce));
    }
}
