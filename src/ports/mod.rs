//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the form logic and the outside world. Adapters implement these ports.
//!
//! ## Availability Ports
//!
//! - `AvailabilityChecker` - Resolves whether a username is still free
//! - `RequestToken` / `RequestTokens` - Supersession tracking for checks
//! - `HttpTransport` - Raw `GET` exchange used by the HTTP availability client
//!
//! ## Collaborator Ports
//!
//! - `PasswordStrengthScorer` - Opaque password strength rating

mod availability_checker;
mod http_transport;
mod password_strength_scorer;

pub use availability_checker::{AvailabilityChecker, RequestToken, RequestTokens};
pub use http_transport::{
    HttpResponse, HttpTransport, TransportError, TransportFaultKind, TransportResponse,
};
pub use password_strength_scorer::PasswordStrengthScorer;
