//! Sign-up form domain.
//!
//! Pure rules and types behind the form: password strength levels, field
//! rules with their messages, availability outcomes, and the derived
//! [`ValidationState`] that folds them together.

mod availability;
mod password_strength;
mod rules;
mod validation_state;

pub use availability::{AvailabilityOutcome, AvailabilityResult, UsernameAvailability};
pub use password_strength::{PasswordStrength, StrengthColor};
pub use rules::{
    failure_message, FieldRules, PasswordCheck, UsernameCheck, AVAILABILITY_UNCHECKED,
    NAME_NOT_AVAILABLE, PASSWORDS_DO_NOT_MATCH, PASSWORD_EMPTY, PASSWORD_NOT_STRONG_ENOUGH,
    SERVER_ERROR,
};
pub use validation_state::{FormInputs, ValidationState};
