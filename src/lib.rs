//! Sign-Up Form - Reactive sign-up form validation
//!
//! This crate derives a sign-up form's validity and user-facing messages from
//! its username, password and confirmation fields, combining local rules with
//! a debounced, retried username availability check.
//!
//! - `domain` - Rules, messages, error taxonomy and the derived state
//! - `ports` - Traits at the network and strength-scoring seams
//! - `adapters` - HTTP availability client, strength scorer, test doubles
//! - `application` - Field streams, validation pipeline, form controller
//! - `config` - Environment and file based configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
