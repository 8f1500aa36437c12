//! Form behavior configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::signup::FieldRules;

/// Form behavior configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FormConfig {
    /// Quiet period before a username is checked, in milliseconds
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    #[serde(default = "default_min_username_length")]
    pub min_username_length: usize,

    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl FormConfig {
    /// Get debounce period as Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Field rules for these minimum lengths
    pub fn rules(&self) -> FieldRules {
        FieldRules::new(self.min_username_length, self.min_password_length)
    }

    /// Validate form configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.debounce_ms > 10_000 {
            return Err(ValidationError::InvalidDebounce);
        }
        if self.min_username_length == 0 {
            return Err(ValidationError::InvalidMinimumLength("form.min_username_length"));
        }
        if self.min_password_length == 0 {
            return Err(ValidationError::InvalidMinimumLength("form.min_password_length"));
        }
        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            min_username_length: default_min_username_length(),
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_debounce() -> u64 {
    800
}

fn default_min_username_length() -> usize {
    3
}

fn default_min_password_length() -> usize {
    8
}
