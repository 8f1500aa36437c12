//! Retry with exponential backoff, gated by error classification.
//!
//! The loop carries its own state (retries so far, next delay) and waits
//! between attempts with a plain sleep measured from the moment the retry is
//! scheduled. A backoff wait ends early when the request token is superseded.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::ports::RequestToken;

/// How often and how patiently a failed request is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `10` means up to 11 attempts.
    pub max_retries: u32,
    /// Wait before the first retry; doubled for each further retry.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            initial_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy.
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }

    /// Total time spent waiting if every retry is used.
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_retries).fold(Duration::ZERO, |total, retry| {
            total.saturating_add(self.delay_for(retry))
        })
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// runs out of retries, or `token` is superseded during a backoff wait.
    ///
    /// The operation receives the 0-based attempt number. The error of the
    /// last attempt is returned unchanged; there is no separate
    /// "retries exhausted" error.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        mut operation: F,
        is_retryable: P,
        token: &mut RequestToken,
    ) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt = 0;
        let mut delay = self.initial_delay;

        loop {
            let error = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !is_retryable(&error) {
                return Err(error);
            }

            if attempt >= self.max_retries {
                tracing::warn!(attempts = attempt + 1, %error, "Retries exhausted");
                return Err(error);
            }

            tracing::debug!(
                retry = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                %error,
                "Scheduling retry"
            );

            tokio::select! {
                _ = sleep(delay) => {}
                _ = token.superseded() => {
                    tracing::debug!(attempt, "Request superseded during backoff");
                    return Err(error);
                }
            }

            attempt += 1;
            delay = delay.saturating_mul(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestTokens;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Fatal,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn is_transient(error: &TestError) -> bool {
        *error == TestError::Transient
    }

    #[test]
    fn delays_double_from_initial() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));

        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
        assert_eq!(policy.total_backoff(), Duration::from_millis(1500));
    }

    #[test]
    fn default_policy_allows_ten_retries() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 10);
        assert_eq!(policy.initial_delay, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_errors_with_backoff_until_success() {
        let policy = RetryPolicy::new(10, Duration::from_millis(100));
        let attempts = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let counter = attempts.clone();
        let result = policy
            .run(
                move |_| {
                    let counter = counter.clone();
                    async move {
                        if counter.fetch_add(1, Ordering::SeqCst) < 3 {
                            Err(TestError::Transient)
                        } else {
                            Ok("done")
                        }
                    }
                },
                is_transient,
                &mut RequestToken::detached(),
            )
            .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
        assert_eq!(started.elapsed(), Duration::from_millis(100 + 200 + 400));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries_with_last_error() {
        let policy = RetryPolicy::new(10, Duration::from_millis(1));
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        let result: Result<(), TestError> = policy
            .run(
                move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Err(TestError::Transient) }
                },
                is_transient,
                &mut RequestToken::detached(),
            )
            .await;

        assert_eq!(result, Err(TestError::Transient));
        assert_eq!(attempts.load(Ordering::SeqCst), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_error_stops_immediately() {
        let policy = RetryPolicy::default();
        let attempts = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let counter = attempts.clone();
        let result: Result<(), TestError> = policy
            .run(
                move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Err(TestError::Fatal) }
                },
                is_transient,
                &mut RequestToken::detached(),
            )
            .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_token_cancels_backoff() {
        let policy = RetryPolicy::new(10, Duration::from_secs(3));
        let tokens = Arc::new(RequestTokens::new());
        let mut token = tokens.issue();
        let attempts = Arc::new(AtomicU32::new(0));

        let issuer = tokens.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(1)).await;
            issuer.issue();
        });

        let started = Instant::now();
        let counter = attempts.clone();
        let result: Result<(), TestError> = policy
            .run(
                move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Err(TestError::Transient) }
                },
                is_transient,
                &mut token,
            )
            .await;

        assert_eq!(result, Err(TestError::Transient));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn operation_sees_attempt_numbers() {
        let policy = RetryPolicy::new(2, Duration::from_millis(10));
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

        let record = seen.clone();
        let _: Result<(), TestError> = policy
            .run(
                move |attempt| {
                    record.lock().unwrap().push(attempt);
                    async { Err(TestError::Transient) }
                },
                is_transient,
                &mut RequestToken::detached(),
            )
            .await;

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }
}
