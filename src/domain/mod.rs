//! Domain layer containing the form's rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (the classified error taxonomy)
//! - `signup` - Field rules, password strength, availability outcomes and
//!   the derived validation state

pub mod foundation;
pub mod signup;
