//! Foundation module - Shared domain primitives.
//!
//! Contains the error taxonomy shared by every layer of the sign-up form.

mod errors;

pub use errors::{ApiError, ApiErrorKind};
