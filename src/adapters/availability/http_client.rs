//! HTTP Availability Client - Implementation of AvailabilityChecker over HTTP.
//!
//! Sends `GET <endpoint>?userName=<name>` through an [`HttpTransport`] and
//! classifies the outcome into an [`ApiError`] kind:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | endpoint cannot form a URL | `InvalidRequest`, nothing sent |
//! | transport fault | `Transport` |
//! | non-HTTP response | `InvalidResponse` |
//! | 2xx | decoded `isAvailable`, or `Decoding` |
//! | 400 | `Validation(reason)`, or `Decoding` if the error body is unreadable |
//! | 5xx | `ServerError` with reason and `Retry-After`, retried with backoff |
//! | anything else | `Decoding` |
//!
//! # Configuration
//!
//! ```ignore
//! let client = HttpAvailabilityClient::new(transport, "http://127.0.0.1:8080/isUserNameAvailable")
//!     .with_retry_policy(RetryPolicy::new(10, Duration::from_secs(3)));
//! ```

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::sync::Arc;
use tracing::Instrument;

use crate::domain::foundation::ApiError;
use crate::domain::signup::AvailabilityResult;
use crate::ports::{
    AvailabilityChecker, HttpResponse, HttpTransport, RequestToken, TransportResponse,
};

use super::retry::RetryPolicy;

/// Query parameter carrying the username.
const USER_NAME_PARAM: &str = "userName";

/// Availability client speaking the JSON availability endpoint.
pub struct HttpAvailabilityClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    retry: RetryPolicy,
}

impl HttpAvailabilityClient {
    /// Creates a client with the default retry policy.
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the retry policy for server errors.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the request URL for a username.
    fn request_url(&self, username: &str) -> Result<Url, ApiError> {
        let url = Url::parse_with_params(&self.endpoint, &[(USER_NAME_PARAM, username)])
            .map_err(|e| ApiError::invalid_request(format!("{}: {}", self.endpoint, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ApiError::invalid_request(format!(
                "unsupported scheme '{}'",
                other
            ))),
        }
    }

    /// Sends one request and classifies its outcome.
    async fn attempt(&self, url: &Url, attempt: u32) -> AvailabilityResult {
        tracing::debug!(attempt, %url, "Sending availability request");

        let response = match self.transport.get(url).await {
            Ok(TransportResponse::Http(response)) => response,
            Ok(TransportResponse::NonHttp) => {
                tracing::warn!("Availability endpoint returned a non-HTTP response");
                return Err(ApiError::InvalidResponse);
            }
            Err(fault) => {
                tracing::warn!(kind = ?fault.kind, "Availability request failed: {}", fault);
                return Err(ApiError::transport(fault.cause));
            }
        };

        classify_response(&response)
    }
}

#[async_trait]
impl AvailabilityChecker for HttpAvailabilityClient {
    async fn check_availability(&self, username: &str) -> AvailabilityResult {
        self.check_availability_until(username, RequestToken::detached())
            .await
    }

    async fn check_availability_until(
        &self,
        username: &str,
        mut token: RequestToken,
    ) -> AvailabilityResult {
        let span = tracing::debug_span!(
            "check_availability",
            username,
            generation = token.generation()
        );

        async {
            let url = self.request_url(username)?;
            let url = &url;

            let result = self
                .retry
                .run(
                    |attempt| self.attempt(url, attempt),
                    ApiError::is_retryable,
                    &mut token,
                )
                .await;

            match &result {
                Ok(available) => tracing::debug!(available, "Availability resolved"),
                Err(error) => tracing::debug!(kind = %error.kind(), "Availability check failed: {}", error),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Success body of the availability endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNameAvailableMessage {
    is_available: bool,
    user_name: String,
}

/// Error body sent with 4xx and 5xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    error: bool,
    reason: String,
}

/// Maps an HTTP response to an availability result.
fn classify_response(response: &HttpResponse) -> AvailabilityResult {
    let status = response.status;

    if status.is_success() {
        let message: UserNameAvailableMessage = serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::decoding(format!("availability body: {}", e)))?;
        tracing::debug!(user_name = %message.user_name, "Decoded availability body");
        return Ok(message.is_available);
    }

    match status.as_u16() {
        400 => {
            let message = decode_error_body(&response.body)?;
            Err(ApiError::validation(message.reason))
        }
        code @ 500..=599 => {
            let reason = decode_error_body(&response.body)
                .ok()
                .map(|message| message.reason);
            let retry_after = response.header("Retry-After");
            Err(ApiError::server(code, reason, retry_after))
        }
        code => Err(ApiError::decoding(format!("unexpected status {}", code))),
    }
}

fn decode_error_body(body: &[u8]) -> Result<ApiErrorMessage, ApiError> {
    let message: ApiErrorMessage = serde_json::from_slice(body)
        .map_err(|e| ApiError::decoding(format!("error body: {}", e)))?;
    tracing::debug!(error = message.error, reason = %message.reason, "Decoded error body");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::availability::MockHttpTransport;
    use crate::ports::{RequestTokens, TransportError};
    use http::StatusCode;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    const ENDPOINT: &str = "http://127.0.0.1:8080/isUserNameAvailable";

    fn client(transport: &MockHttpTransport) -> HttpAvailabilityClient {
        HttpAvailabilityClient::new(Arc::new(transport.clone()), ENDPOINT)
            .with_retry_policy(RetryPolicy::new(10, Duration::from_millis(100)))
    }

    fn server_error(status: StatusCode) -> MockHttpTransport {
        MockHttpTransport::new().with_json(status, json!({"error": true, "reason": "busy"}))
    }

    #[tokio::test(start_paused = true)]
    async fn available_name_decodes_success_body() {
        let transport = MockHttpTransport::new().with_json(
            StatusCode::OK,
            json!({"isAvailable": true, "userName": "alice"}),
        );

        let result = client(&transport).check_availability("alice").await;

        assert_eq!(result, Ok(true));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn username_is_sent_as_query_parameter() {
        let transport = MockHttpTransport::new();

        client(&transport).check_availability("a b&c").await.unwrap();

        let url = &transport.requests()[0];
        assert_eq!(url.path(), "/isUserNameAvailable");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("userName".to_string(), "a b&c".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn taken_name_resolves_false() {
        let transport = MockHttpTransport::new().with_json(
            StatusCode::OK,
            json!({"isAvailable": false, "userName": "alice"}),
        );

        assert_eq!(client(&transport).check_availability("alice").await, Ok(false));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_success_body_is_a_decoding_error() {
        let transport =
            MockHttpTransport::new().with_json(StatusCode::OK, json!({"available": "yes"}));

        let result = client(&transport).check_availability("alice").await;

        assert!(matches!(result, Err(ApiError::Decoding(_))));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn bad_request_surfaces_validation_reason() {
        let transport = MockHttpTransport::new().with_json(
            StatusCode::BAD_REQUEST,
            json!({"error": true, "reason": "reserved name"}),
        );

        let result = client(&transport).check_availability("admin").await;

        assert_eq!(result, Err(ApiError::validation("reserved name")));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unreadable_bad_request_body_is_not_retried() {
        let transport = MockHttpTransport::new().with_status(StatusCode::BAD_REQUEST, "oops");

        let result = client(&transport).check_availability("admin").await;

        assert!(matches!(result, Err(ApiError::Decoding(_))));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_carries_reason_and_retry_after() {
        let transport = MockHttpTransport::new().with_repeated(
            11,
            Ok(TransportResponse::Http(
                HttpResponse::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({"error": true, "reason": "maintenance"}).to_string(),
                )
                .with_header("Retry-After", "120"),
            )),
        );

        let result = client(&transport).check_availability("alice").await;

        assert_eq!(
            result,
            Err(ApiError::server(
                503,
                Some("maintenance".to_string()),
                Some("120".to_string())
            ))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn server_errors_are_retried_until_success() {
        let failing = server_error(StatusCode::INTERNAL_SERVER_ERROR);
        let transport = (0..4)
            .fold(failing, |t, _| {
                t.with_json(StatusCode::BAD_GATEWAY, json!({"error": true, "reason": "busy"}))
            })
            .with_json(StatusCode::OK, json!({"isAvailable": true, "userName": "alice"}));
        let started = Instant::now();

        let result = client(&transport).check_availability("alice").await;

        assert_eq!(result, Ok(true));
        assert_eq!(transport.request_count(), 6);
        assert_eq!(
            started.elapsed(),
            Duration::from_millis(100 + 200 + 400 + 800 + 1600)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_surface_last_server_error() {
        let transport = MockHttpTransport::new().with_repeated(
            11,
            Ok(TransportResponse::Http(HttpResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "",
            ))),
        );

        let result = client(&transport).check_availability("alice").await;

        assert_eq!(result, Err(ApiError::server(500, None, None)));
        assert_eq!(transport.request_count(), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_fault_is_not_retried() {
        let transport =
            MockHttpTransport::new().with_fault(TransportError::connect("connection refused"));

        let result = client(&transport).check_availability("alice").await;

        assert_eq!(result, Err(ApiError::transport("connection refused")));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn non_http_response_is_invalid_response() {
        let transport = MockHttpTransport::new().with_exchange(Ok(TransportResponse::NonHttp));

        let result = client(&transport).check_availability("alice").await;

        assert_eq!(result, Err(ApiError::InvalidResponse));
    }

    #[tokio::test(start_paused = true)]
    async fn unexpected_status_is_a_decoding_error() {
        let transport = MockHttpTransport::new().with_json(
            StatusCode::NOT_FOUND,
            json!({"error": true, "reason": "no such route"}),
        );

        let result = client(&transport).check_availability("alice").await;

        assert!(matches!(result, Err(ApiError::Decoding(_))));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_endpoint_fails_without_sending() {
        let transport = MockHttpTransport::new();
        let client = HttpAvailabilityClient::new(Arc::new(transport.clone()), "not a url");

        let result = client.check_availability("alice").await;

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn non_http_scheme_is_an_invalid_request() {
        let transport = MockHttpTransport::new();
        let client = HttpAvailabilityClient::new(Arc::new(transport.clone()), "ftp://example.com/check");

        let result = client.check_availability("alice").await;

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_check_stops_retrying() {
        let transport = MockHttpTransport::new().with_repeated(
            11,
            Ok(TransportResponse::Http(HttpResponse::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "",
            ))),
        );
        let client = Arc::new(client(&transport));
        let tokens = RequestTokens::new();
        let token = tokens.issue();

        let check = {
            let client = client.clone();
            tokio::spawn(async move { client.check_availability_until("alice", token).await })
        };

        // First retry waits 100ms, second 200ms; supersede during the second.
        tokio::time::sleep(Duration::from_millis(150)).await;
        let _newer = tokens.issue();

        let result = check.await.unwrap();
        assert_eq!(result, Err(ApiError::server(503, None, None)));
        assert_eq!(transport.request_count(), 2);
    }
}
