//! Form controller - the consumer-facing face of the sign-up form.
//!
//! Owns the field streams, wires the [`ValidationPipeline`] once at
//! construction and republishes the derived [`ValidationState`].
//!
//! # Example
//!
//! ```ignore
//! let controller = FormController::new(checker, scorer, PipelineConfig::default());
//! controller.set_username("alice");
//! controller.set_password("Str0ng!Pass");
//! controller.set_confirmation("Str0ng!Pass");
//!
//! let mut states = controller.subscribe();
//! while states.changed().await.is_ok() {
//!     render(&states.borrow_and_update());
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use super::fields::FormFields;
use super::pipeline::{PipelineConfig, ValidationPipeline};
use crate::domain::signup::{UsernameAvailability, ValidationState};
use crate::ports::{AvailabilityChecker, PasswordStrengthScorer};

/// Credentials handed over once the form is valid.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub user_name: String,
    pub password: String,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Reasons a submission is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("this client is outdated and must be updated before signing up")]
    NeedsUpdate,

    #[error("form is not valid")]
    Invalid(ValidationState),
}

/// Sign-up form controller.
pub struct FormController {
    fields: FormFields,
    pipeline: ValidationPipeline,
}

impl FormController {
    /// Creates an empty form and starts validating it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn new(
        checker: Arc<dyn AvailabilityChecker>,
        scorer: Arc<dyn PasswordStrengthScorer>,
        config: PipelineConfig,
    ) -> Self {
        let fields = FormFields::new();
        let pipeline = ValidationPipeline::spawn(&fields, checker, scorer, config);
        Self { fields, pipeline }
    }

    pub fn set_username(&self, username: impl Into<String>) {
        self.fields.username.set(username);
        self.pipeline.refresh();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.fields.password.set(password);
        self.pipeline.refresh();
    }

    pub fn set_confirmation(&self, confirmation: impl Into<String>) {
        self.fields.confirmation.set(confirmation);
        self.pipeline.refresh();
    }

    pub fn username(&self) -> String {
        self.fields.username.current()
    }

    pub fn password(&self) -> String {
        self.fields.password.current()
    }

    pub fn confirmation(&self) -> String {
        self.fields.confirmation.current()
    }

    /// Latest validation state.
    pub fn state(&self) -> ValidationState {
        self.pipeline.state()
    }

    pub fn is_valid(&self) -> bool {
        self.state().is_valid
    }

    pub fn needs_update(&self) -> bool {
        self.state().needs_update
    }

    /// Subscribes to validation state changes.
    pub fn subscribe(&self) -> watch::Receiver<ValidationState> {
        self.pipeline.subscribe()
    }

    /// Subscribes to the shared username availability signal.
    pub fn availability(&self) -> watch::Receiver<UsernameAvailability> {
        self.pipeline.availability()
    }

    /// Produces the sign-up request if the form is currently valid.
    pub fn submit(&self) -> Result<SignUpRequest, SubmitError> {
        self.pipeline.refresh();
        let state = self.state();

        if state.needs_update {
            debug!("Submission refused, client needs update");
            return Err(SubmitError::NeedsUpdate);
        }
        if !state.is_valid {
            debug!(
                username_message = %state.username_message,
                password_message = %state.password_message,
                "Submission refused, form is not valid"
            );
            return Err(SubmitError::Invalid(state));
        }

        let request = SignUpRequest {
            user_name: self.username(),
            password: self.password(),
        };
        info!(username = %request.user_name, "Sign-up form submitted");
        Ok(request)
    }
}
