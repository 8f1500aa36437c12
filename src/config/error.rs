//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Availability endpoint must be an http(s) URL")]
    InvalidEndpoint,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Retry count exceeds maximum allowed (20)")]
    TooManyRetries,

    #[error("Initial backoff must be greater than zero")]
    InvalidBackoff,

    #[error("Debounce period exceeds maximum allowed (10s)")]
    InvalidDebounce,

    #[error("Minimum length must be at least 1: {0}")]
    InvalidMinimumLength(&'static str),
}
