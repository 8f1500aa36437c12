//! HTTP Transport Port - Interface for the raw request/response exchange.
//!
//! The availability client owns request construction, status classification
//! and body decoding. This port only moves bytes: it performs a `GET` and
//! hands back whatever came back, or a transport fault if nothing did.

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use reqwest::Url;
use thiserror::Error;

/// Port for performing a single HTTP `GET`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request. No retries happen at this level.
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError>;
}

/// What the transport received.
#[derive(Debug, Clone)]
pub enum TransportResponse {
    /// A regular HTTP response.
    Http(HttpResponse),
    /// The transport produced a response that is not HTTP.
    NonHttp,
}

/// Status, headers and body of an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response without headers.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }
}

/// Coarse category of a transport fault, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFaultKind {
    Timeout,
    Connect,
    Other,
}

/// The request did not produce any response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct TransportError {
    pub kind: TransportFaultKind,
    pub cause: String,
}

impl TransportError {
    /// Creates a timeout fault.
    pub fn timeout(cause: impl Into<String>) -> Self {
        Self {
            kind: TransportFaultKind::Timeout,
            cause: cause.into(),
        }
    }

    /// Creates a connection fault.
    pub fn connect(cause: impl Into<String>) -> Self {
        Self {
            kind: TransportFaultKind::Connect,
            cause: cause.into(),
        }
    }

    /// Creates an unspecified fault.
    pub fn other(cause: impl Into<String>) -> Self {
        Self {
            kind: TransportFaultKind::Other,
            cause: cause.into(),
        }
    }
}
