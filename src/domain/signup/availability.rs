//! Username availability outcomes as seen by the validation pipeline.

use crate::domain::foundation::ApiError;

/// Terminal result of one availability check (after any retries).
pub type AvailabilityResult = Result<bool, ApiError>;

/// A completed availability check, tagged with the username it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityOutcome {
    pub username: String,
    pub result: AvailabilityResult,
}

impl AvailabilityOutcome {
    /// Creates a new outcome.
    pub fn new(username: impl Into<String>, result: AvailabilityResult) -> Self {
        Self {
            username: username.into(),
            result,
        }
    }
}

/// Latest known availability of the committed username.
///
/// Starts `Unresolved` and only ever moves to the outcome of the most
/// recently committed check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UsernameAvailability {
    #[default]
    Unresolved,
    Resolved(AvailabilityOutcome),
}

impl UsernameAvailability {
    /// Returns the result if it was issued for exactly this username.
    ///
    /// A result for any other username says nothing about the current one.
    pub fn result_for(&self, username: &str) -> Option<&AvailabilityResult> {
        match self {
            UsernameAvailability::Resolved(outcome) if outcome.username == username => {
                Some(&outcome.result)
            }
            _ => None,
        }
    }

    /// True if the latest outcome is a decoding failure.
    pub fn needs_client_update(&self) -> bool {
        match self {
            UsernameAvailability::Resolved(AvailabilityOutcome {
                result: Err(error), ..
            }) => error.needs_client_update(),
            _ => false,
        }
    }
}
