//! Availability Checker Port - Interface for the username availability check.
//!
//! The validation pipeline asks this port whether a username is still free.
//! Implementations talk to the network, classify every failure into an
//! [`ApiError`](crate::domain::foundation::ApiError) and retry transient
//! server errors internally, so each call resolves exactly once.
//!
//! # Supersession
//!
//! Every check the pipeline issues carries a [`RequestToken`]. When the user
//! commits a newer username, the token of the older check is superseded.
//! Implementations may use this to abandon backoff waits early; the
//! pipeline discards results of superseded checks either way.
//!
//! # Example
//!
//! ```ignore
//! let tokens = RequestTokens::new();
//! let token = tokens.issue();
//! let result = checker.check_availability_until("alice", token).await;
//! ```

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::signup::AvailabilityResult;

/// Port for checking whether a username can still be registered.
#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    /// Checks a username, resolving once after any internal retries.
    ///
    /// The username is used verbatim; length filtering is the caller's job.
    async fn check_availability(&self, username: &str) -> AvailabilityResult;

    /// Checks a username on behalf of a request that may be superseded.
    ///
    /// The default ignores the token and runs the check to completion.
    async fn check_availability_until(
        &self,
        username: &str,
        _token: RequestToken,
    ) -> AvailabilityResult {
        self.check_availability(username).await
    }
}

/// Identifies one issued check and observes whether a newer one replaced it.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: u64,
    latest: watch::Receiver<u64>,
}

impl RequestToken {
    /// A token that is never superseded.
    pub fn detached() -> Self {
        let (_latest_tx, latest) = watch::channel(0);
        Self {
            generation: 0,
            latest,
        }
    }

    /// Generation number this token was issued with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer token has been issued.
    pub fn is_current(&self) -> bool {
        *self.latest.borrow() == self.generation
    }

    /// Resolves once a newer token has been issued.
    ///
    /// Never resolves for a detached token or once the issuer is gone.
    pub async fn superseded(&mut self) {
        loop {
            if !self.is_current() {
                return;
            }
            if self.latest.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Issues monotonically increasing [`RequestToken`]s.
#[derive(Debug)]
pub struct RequestTokens {
    latest: watch::Sender<u64>,
}

impl RequestTokens {
    /// Creates an issuer; the first token gets generation 1.
    pub fn new() -> Self {
        let (latest, _) = watch::channel(0);
        Self { latest }
    }

    /// Issues a new token, superseding every earlier one.
    pub fn issue(&self) -> RequestToken {
        let mut generation = 0;
        self.latest.send_modify(|latest| {
            *latest += 1;
            generation = *latest;
        });
        RequestToken {
            generation,
            latest: self.latest.subscribe(),
        }
    }

    /// True if `generation` belongs to the most recently issued token.
    pub fn is_latest(&self, generation: u64) -> bool {
        *self.latest.borrow() == generation
    }
}

impl Default for RequestTokens {
    fn default() -> Self {
        Self::new()
    }
}
