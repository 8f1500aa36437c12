//! The derived validation state published to the UI.

use serde::Serialize;

use super::availability::UsernameAvailability;
use super::password_strength::{PasswordStrength, StrengthColor};
use super::rules::FieldRules;

/// Snapshot of the three form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub username: String,
    pub password: String,
    pub confirmation: String,
}

impl FormInputs {
    /// Creates a new snapshot.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirmation: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirmation: confirmation.into(),
        }
    }
}

/// Everything the UI needs to render the form.
///
/// Never mutated directly: it is recomputed from the inputs, the password
/// strength and the latest availability outcome on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationState {
    pub username_message: String,
    pub password_message: String,
    /// Strength meter fill, in `0.0..=1.0`.
    pub strength_value: f64,
    pub strength_color: StrengthColor,
    pub is_valid: bool,
    /// The server speaks a wire format this client does not understand.
    pub needs_update: bool,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            username_message: String::new(),
            password_message: String::new(),
            strength_value: 0.0,
            strength_color: StrengthColor::Red,
            is_valid: false,
            needs_update: false,
        }
    }
}

impl ValidationState {
    /// Folds inputs, strength and availability into the published state.
    pub fn derive(
        rules: &FieldRules,
        inputs: &FormInputs,
        strength: PasswordStrength,
        availability: &UsernameAvailability,
    ) -> Self {
        let username = rules.check_username(&inputs.username, availability);
        let password = rules.check_password(&inputs.password, &inputs.confirmation, strength);

        Self {
            username_message: username.message(),
            password_message: password.message(),
            strength_value: strength.meter_value(),
            strength_color: strength.color(),
            is_valid: username.is_valid() && password.is_valid(),
            needs_update: availability.needs_client_update(),
        }
    }
}
