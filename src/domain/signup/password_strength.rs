//! Password strength levels and their meter presentation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength of a password, as judged by a strength scorer.
///
/// Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Reasonable,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    /// Returns true if a password of this strength may be used to sign up.
    pub fn is_strong_enough(&self) -> bool {
        match self {
            PasswordStrength::VeryWeak | PasswordStrength::Weak => false,
            PasswordStrength::Reasonable
            | PasswordStrength::Strong
            | PasswordStrength::VeryStrong => true,
        }
    }

    /// Fill level of the strength meter, in `0.0..=1.0`.
    pub fn meter_value(&self) -> f64 {
        match self {
            PasswordStrength::VeryWeak => 0.25,
            PasswordStrength::Weak => 0.35,
            PasswordStrength::Reasonable => 0.5,
            PasswordStrength::Strong => 0.75,
            PasswordStrength::VeryStrong => 1.0,
        }
    }

    /// Tint of the strength meter.
    pub fn color(&self) -> StrengthColor {
        match self {
            PasswordStrength::VeryWeak | PasswordStrength::Weak => StrengthColor::Red,
            PasswordStrength::Reasonable => StrengthColor::Orange,
            PasswordStrength::Strong => StrengthColor::Yellow,
            PasswordStrength::VeryStrong => StrengthColor::Green,
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PasswordStrength::VeryWeak => "very weak",
            PasswordStrength::Weak => "weak",
            PasswordStrength::Reasonable => "reasonable",
            PasswordStrength::Strong => "strong",
            PasswordStrength::VeryStrong => "very strong",
        };
        write!(f, "{}", s)
    }
}

/// Color of the password strength meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthColor {
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
}

impl fmt::Display for StrengthColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrengthColor::Red => "red",
            StrengthColor::Orange => "orange",
            StrengthColor::Yellow => "yellow",
            StrengthColor::Green => "green",
        };
        write!(f, "{}", s)
    }
}
