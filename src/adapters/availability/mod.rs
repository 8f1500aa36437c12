//! Availability Adapters.
//!
//! Implementations of the availability ports.
//!
//! ## Available Adapters
//!
//! - `HttpAvailabilityClient` - Classifying, retrying client for the JSON endpoint
//! - `ReqwestTransport` - `HttpTransport` over `reqwest`
//! - `RetryPolicy` - Exponential backoff gated by error classification
//! - `MockAvailabilityChecker` - Configurable checker for pipeline tests
//! - `MockHttpTransport` - Scripted transport for client tests

mod http_client;
mod mock_checker;
mod mock_transport;
mod reqwest_transport;
mod retry;

pub use http_client::HttpAvailabilityClient;
pub use mock_checker::MockAvailabilityChecker;
pub use mock_transport::{MockExchange, MockHttpTransport};
pub use reqwest_transport::ReqwestTransport;
pub use retry::RetryPolicy;
