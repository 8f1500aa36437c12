//! Error types for the domain layer.
//!
//! [`ApiError`] is the closed set of failure kinds an availability check can
//! end in. Every failure path through the availability client is classified
//! into exactly one of these before it reaches the validation pipeline.

use std::fmt;
use thiserror::Error;

/// A classified failure of the username availability check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be built, e.g. the endpoint is not a valid URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The transport answered with something that is not an HTTP response.
    #[error("invalid response")]
    InvalidResponse,

    /// Server-side validation rejected the username.
    #[error("validation error: {0}")]
    Validation(String),

    /// The server sent data in a format this client does not understand.
    #[error("the server returned data in an unexpected format, try updating the app: {0}")]
    Decoding(String),

    /// General server-side error. The only kind that is retried.
    #[error(
        "server error with code {status_code}, reason: {}, retry after: {}",
        .reason.as_deref().unwrap_or("no reason given"),
        .retry_after.as_deref().unwrap_or("not provided")
    )]
    ServerError {
        status_code: u16,
        reason: Option<String>,
        retry_after: Option<String>,
    },
}

impl ApiError {
    /// Creates an invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    /// Creates a transport error.
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::Transport(cause.into())
    }

    /// Creates a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Creates a decoding error.
    pub fn decoding(cause: impl Into<String>) -> Self {
        Self::Decoding(cause.into())
    }

    /// Creates a server error.
    pub fn server(status_code: u16, reason: Option<String>, retry_after: Option<String>) -> Self {
        Self::ServerError {
            status_code,
            reason,
            retry_after,
        }
    }

    /// Returns the fieldless kind of this error.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::InvalidRequest(_) => ApiErrorKind::InvalidRequest,
            ApiError::Transport(_) => ApiErrorKind::Transport,
            ApiError::InvalidResponse => ApiErrorKind::InvalidResponse,
            ApiError::Validation(_) => ApiErrorKind::Validation,
            ApiError::Decoding(_) => ApiErrorKind::Decoding,
            ApiError::ServerError { .. } => ApiErrorKind::ServerError,
        }
    }

    /// Returns true if the failed request should be sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::ServerError { .. })
    }

    /// Returns true if the failure means the client no longer speaks the
    /// server's wire format.
    pub fn needs_client_update(&self) -> bool {
        matches!(self, ApiError::Decoding(_))
    }
}

/// Fieldless mirror of [`ApiError`] for exhaustiveness checks and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    InvalidRequest,
    Transport,
    InvalidResponse,
    Validation,
    Decoding,
    ServerError,
}

impl ApiErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ApiErrorKind; 6] = [
        ApiErrorKind::InvalidRequest,
        ApiErrorKind::Transport,
        ApiErrorKind::InvalidResponse,
        ApiErrorKind::Validation,
        ApiErrorKind::Decoding,
        ApiErrorKind::ServerError,
    ];
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiErrorKind::InvalidRequest => "INVALID_REQUEST",
            ApiErrorKind::Transport => "TRANSPORT",
            ApiErrorKind::InvalidResponse => "INVALID_RESPONSE",
            ApiErrorKind::Validation => "VALIDATION",
            ApiErrorKind::Decoding => "DECODING",
            ApiErrorKind::ServerError => "SERVER_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_server_errors_are_retryable() {
        let errors = [
            ApiError::invalid_request("bad url"),
            ApiError::transport("connection refused"),
            ApiError::InvalidResponse,
            ApiError::validation("reserved name"),
            ApiError::decoding("missing field `isAvailable`"),
            ApiError::server(503, None, None),
        ];

        for error in errors {
            assert_eq!(
                error.is_retryable(),
                error.kind() == ApiErrorKind::ServerError,
                "{}",
                error.kind()
            );
        }
    }

    #[test]
    fn only_decoding_errors_need_client_update() {
        assert!(ApiError::decoding("bad body").needs_client_update());
        assert!(!ApiError::transport("timeout").needs_client_update());
        assert!(!ApiError::server(500, Some("boom".to_string()), None).needs_client_update());
    }

    #[test]
    fn server_error_display_fills_in_missing_parts() {
        let error = ApiError::server(502, None, Some("120".to_string()));
        assert_eq!(
            error.to_string(),
            "server error with code 502, reason: no reason given, retry after: 120"
        );
    }

    #[test]
    fn kind_round_trips_through_all() {
        let sample = ApiError::validation("x");
        assert!(ApiErrorKind::ALL.contains(&sample.kind()));
        assert_eq!(ApiErrorKind::ALL.len(), 6);
    }

    #[test]
    fn kind_display_is_screaming_snake_case() {
        assert_eq!(ApiErrorKind::ServerError.to_string(), "SERVER_ERROR");
        assert_eq!(ApiErrorKind::InvalidResponse.to_string(), "INVALID_RESPONSE");
    }
}
