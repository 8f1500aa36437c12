//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `availability` - Username availability over HTTP (reqwest, mocks)
//! - `strength` - Password strength scoring

pub mod availability;
pub mod strength;

pub use availability::{
    HttpAvailabilityClient, MockAvailabilityChecker, MockExchange, MockHttpTransport,
    ReqwestTransport, RetryPolicy,
};
pub use strength::EntropyStrengthScorer;
