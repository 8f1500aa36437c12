//! Mock availability checker for testing.
//!
//! Provides a configurable mock implementation of the AvailabilityChecker
//! port so pipeline tests run without any network.
//!
//! # Features
//!
//! - Per-username results (every other name is available)
//! - Per-username latency for ordering tests
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let checker = MockAvailabilityChecker::new()
//!     .with_result("admin", Err(ApiError::validation("reserved name")))
//!     .with_delay_for("slow", Duration::from_secs(2));
//!
//! assert_eq!(checker.check_availability("alice").await, Ok(true));
//! assert_eq!(checker.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::signup::AvailabilityResult;
use crate::ports::AvailabilityChecker;

/// Mock availability checker.
///
/// # Panics
///
/// Methods panic if internal locks are poisoned. Test use only.
#[derive(Debug, Clone, Default)]
pub struct MockAvailabilityChecker {
    results: Arc<Mutex<HashMap<String, AvailabilityResult>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    default_delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAvailabilityChecker {
    /// Creates a checker that reports every name as available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result for one username.
    pub fn with_result(self, username: impl Into<String>, result: AvailabilityResult) -> Self {
        self.results
            .lock()
            .expect("MockAvailabilityChecker: results lock poisoned")
            .insert(username.into(), result);
        self
    }

    /// Marks a username as already taken.
    pub fn with_taken(self, username: impl Into<String>) -> Self {
        self.with_result(username, Ok(false))
    }

    /// Sets the latency for one username.
    pub fn with_delay_for(self, username: impl Into<String>, delay: Duration) -> Self {
        self.delays
            .lock()
            .expect("MockAvailabilityChecker: delays lock poisoned")
            .insert(username.into(), delay);
        self
    }

    /// Sets the latency for usernames without their own.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Number of checks received.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .expect("MockAvailabilityChecker: calls lock poisoned")
            .len()
    }

    /// Checked usernames, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("MockAvailabilityChecker: calls lock poisoned")
            .clone()
    }

    /// Number of checks received for one username.
    pub fn calls_for(&self, username: &str) -> usize {
        self.calls().iter().filter(|call| *call == username).count()
    }

    fn delay_for(&self, username: &str) -> Duration {
        self.delays
            .lock()
            .expect("MockAvailabilityChecker: delays lock poisoned")
            .get(username)
            .copied()
            .unwrap_or(self.default_delay)
    }

    fn result_for(&self, username: &str) -> AvailabilityResult {
        self.results
            .lock()
            .expect("MockAvailabilityChecker: results lock poisoned")
            .get(username)
            .cloned()
            .unwrap_or(Ok(true))
    }
}

#[async_trait]
impl AvailabilityChecker for MockAvailabilityChecker {
    async fn check_availability(&self, username: &str) -> AvailabilityResult {
        self.calls
            .lock()
            .expect("MockAvailabilityChecker: calls lock poisoned")
            .push(username.to_string());

        let delay = self.delay_for(username);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        self.result_for(username)
    }
}
