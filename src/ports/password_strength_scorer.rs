//! Password strength scoring port.
//!
//! Strength scoring is an opaque collaborator: a pure function from the
//! password text to one of five ordered levels. Any
//! `Fn(&str) -> PasswordStrength` closure can serve as a scorer.

use crate::domain::signup::PasswordStrength;

/// Port for rating a password.
pub trait PasswordStrengthScorer: Send + Sync {
    /// Rates the password. Must be pure: same input, same level.
    fn strength(&self, password: &str) -> PasswordStrength;
}

impl<F> PasswordStrengthScorer for F
where
    F: Fn(&str) -> PasswordStrength + Send + Sync,
{
    fn strength(&self, password: &str) -> PasswordStrength {
        self(password)
    }
}
