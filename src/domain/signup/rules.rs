//! Field rules for the sign-up form.
//!
//! Each field is checked in a fixed order and the first failing rule wins.
//! The checks are pure: they read the current field values and the latest
//! availability outcome and never touch the network.

use crate::domain::foundation::ApiError;

use super::availability::UsernameAvailability;
use super::password_strength::PasswordStrength;

pub const NAME_NOT_AVAILABLE: &str = "name not available";
pub const PASSWORD_EMPTY: &str = "must not be empty";
pub const PASSWORD_NOT_STRONG_ENOUGH: &str = "not strong enough";
pub const PASSWORDS_DO_NOT_MATCH: &str = "do not match";
pub const AVAILABILITY_UNCHECKED: &str = "could not check availability";
pub const SERVER_ERROR: &str = "server error";

/// Minimum lengths applied to the form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    /// Usernames shorter than this are never sent to the server.
    pub min_username_length: usize,
    pub min_password_length: usize,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            min_password_length: 8,
        }
    }
}

impl FieldRules {
    /// Creates rules with custom minimum lengths.
    pub fn new(min_username_length: usize, min_password_length: usize) -> Self {
        Self {
            min_username_length,
            min_password_length,
        }
    }

    /// True if the username is long enough to be checked for availability.
    pub fn username_length_valid(&self, username: &str) -> bool {
        username.chars().count() >= self.min_username_length
    }

    /// True if the password meets the minimum length.
    pub fn password_length_valid(&self, password: &str) -> bool {
        password.chars().count() >= self.min_password_length
    }

    /// Checks the username against its length and the latest availability.
    pub fn check_username(
        &self,
        username: &str,
        availability: &UsernameAvailability,
    ) -> UsernameCheck {
        if !self.username_length_valid(username) {
            return UsernameCheck::TooShort {
                min: self.min_username_length,
            };
        }

        match availability.result_for(username) {
            None => UsernameCheck::Pending,
            Some(Err(error)) => UsernameCheck::Failed(error.clone()),
            Some(Ok(false)) => UsernameCheck::Unavailable,
            Some(Ok(true)) => UsernameCheck::Available,
        }
    }

    /// Checks the password and its confirmation.
    pub fn check_password(
        &self,
        password: &str,
        confirmation: &str,
        strength: PasswordStrength,
    ) -> PasswordCheck {
        if password.is_empty() {
            PasswordCheck::Empty
        } else if !self.password_length_valid(password) {
            PasswordCheck::TooShort {
                min: self.min_password_length,
            }
        } else if !strength.is_strong_enough() {
            PasswordCheck::NotStrongEnough
        } else if password != confirmation {
            PasswordCheck::Mismatch
        } else {
            PasswordCheck::Valid
        }
    }
}

/// Outcome of the username rules, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameCheck {
    TooShort { min: usize },
    /// No definitive availability result for this username yet.
    Pending,
    Failed(ApiError),
    Unavailable,
    Available,
}

impl UsernameCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, UsernameCheck::Available)
    }

    /// Inline message shown under the username field.
    pub fn message(&self) -> String {
        match self {
            UsernameCheck::TooShort { min } => format!("needs at least {} characters", min),
            UsernameCheck::Failed(error) => failure_message(error),
            UsernameCheck::Unavailable => NAME_NOT_AVAILABLE.to_string(),
            UsernameCheck::Pending | UsernameCheck::Available => String::new(),
        }
    }
}

/// Outcome of the password rules, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Empty,
    TooShort { min: usize },
    NotStrongEnough,
    Mismatch,
    Valid,
}

impl PasswordCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, PasswordCheck::Valid)
    }

    /// Inline message shown under the password fields.
    pub fn message(&self) -> String {
        match self {
            PasswordCheck::Empty => PASSWORD_EMPTY.to_string(),
            PasswordCheck::TooShort { min } => format!("needs at least {} characters", min),
            PasswordCheck::NotStrongEnough => PASSWORD_NOT_STRONG_ENOUGH.to_string(),
            PasswordCheck::Mismatch => PASSWORDS_DO_NOT_MATCH.to_string(),
            PasswordCheck::Valid => String::new(),
        }
    }
}

/// Message for a failed availability check.
///
/// Transient and wire-format failures stay silent; the form simply remains
/// invalid. Decoding failures are surfaced separately as "needs update".
pub fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Validation(reason) => reason.clone(),
        ApiError::ServerError { reason, .. } => {
            reason.clone().unwrap_or_else(|| SERVER_ERROR.to_string())
        }
        ApiError::InvalidRequest(_) => AVAILABILITY_UNCHECKED.to_string(),
        ApiError::Transport(_) | ApiError::InvalidResponse | ApiError::Decoding(_) => {
            String::new()
        }
    }
}
