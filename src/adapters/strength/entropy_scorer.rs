//! Entropy-based password strength scorer.
//!
//! Estimates entropy as `length × log2(charset size)`, where the charset is
//! the union of the character classes the password uses, then buckets the
//! estimate into strength levels.
//!
//! | Entropy (bits) | Strength |
//! |----------------|----------|
//! | < 28 | very weak |
//! | < 36 | weak |
//! | < 60 | reasonable |
//! | < 128 | strong |
//! | ≥ 128 | very strong |

use crate::domain::signup::PasswordStrength;
use crate::ports::PasswordStrengthScorer;

const LOWERCASE: u32 = 26;
const UPPERCASE: u32 = 26;
const DIGITS: u32 = 10;
const SYMBOLS: u32 = 33;
const OTHER: u32 = 64;

/// Scores passwords by estimated entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyStrengthScorer;

impl EntropyStrengthScorer {
    /// Creates a scorer.
    pub fn new() -> Self {
        Self
    }

    /// Estimated entropy of the password in bits.
    pub fn entropy_bits(password: &str) -> f64 {
        let (mut lower, mut upper, mut digit, mut symbol, mut other) =
            (false, false, false, false, false);
        let mut length = 0u32;

        for c in password.chars() {
            length += 1;
            if c.is_ascii_lowercase() {
                lower = true;
            } else if c.is_ascii_uppercase() {
                upper = true;
            } else if c.is_ascii_digit() {
                digit = true;
            } else if c.is_ascii_punctuation() || c == ' ' {
                symbol = true;
            } else {
                other = true;
            }
        }

        let charset = [
            (lower, LOWERCASE),
            (upper, UPPERCASE),
            (digit, DIGITS),
            (symbol, SYMBOLS),
            (other, OTHER),
        ]
        .iter()
        .filter(|(used, _)| *used)
        .map(|(_, size)| size)
        .sum::<u32>();

        if charset == 0 {
            return 0.0;
        }
        f64::from(length) * f64::from(charset).log2()
    }
}

impl PasswordStrengthScorer for EntropyStrengthScorer {
    fn strength(&self, password: &str) -> PasswordStrength {
        match Self::entropy_bits(password) {
            bits if bits < 28.0 => PasswordStrength::VeryWeak,
            bits if bits < 36.0 => PasswordStrength::Weak,
            bits if bits < 60.0 => PasswordStrength::Reasonable,
            bits if bits < 128.0 => PasswordStrength::Strong,
            _ => PasswordStrength::VeryStrong,
        }
    }
}
