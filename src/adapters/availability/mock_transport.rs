//! Mock HTTP transport for testing.
//!
//! Replays a scripted queue of responses or faults, one per request, and
//! records every requested URL. Once the queue is empty it answers like an
//! availability endpoint that considers every name free.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockHttpTransport::new()
//!     .with_json(StatusCode::SERVICE_UNAVAILABLE, json!({"error": true, "reason": "busy"}))
//!     .with_json(StatusCode::OK, json!({"isAvailable": true, "userName": "alice"}));
//! ```

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Url;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{HttpResponse, HttpTransport, TransportError, TransportResponse};

/// One scripted exchange.
pub type MockExchange = Result<TransportResponse, TransportError>;

/// Scripted transport for client tests.
///
/// # Panics
///
/// Methods panic if internal locks are poisoned. Test use only.
#[derive(Debug, Clone, Default)]
pub struct MockHttpTransport {
    exchanges: Arc<Mutex<VecDeque<MockExchange>>>,
    requests: Arc<Mutex<Vec<Url>>>,
    delay: Duration,
}

impl MockHttpTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an arbitrary exchange.
    pub fn with_exchange(self, exchange: MockExchange) -> Self {
        self.exchanges
            .lock()
            .expect("MockHttpTransport: exchanges lock poisoned")
            .push_back(exchange);
        self
    }

    /// Queues the same exchange `times` times.
    pub fn with_repeated(self, times: usize, exchange: MockExchange) -> Self {
        (0..times).fold(self, |transport, _| transport.with_exchange(exchange.clone()))
    }

    /// Queues an HTTP response with a raw body.
    pub fn with_status(self, status: StatusCode, body: &str) -> Self {
        self.with_exchange(Ok(TransportResponse::Http(HttpResponse::new(
            status,
            body.as_bytes(),
        ))))
    }

    /// Queues an HTTP response with a JSON body.
    pub fn with_json(self, status: StatusCode, body: serde_json::Value) -> Self {
        self.with_status(status, &body.to_string())
    }

    /// Queues a prepared HTTP response.
    pub fn with_response(self, response: HttpResponse) -> Self {
        self.with_exchange(Ok(TransportResponse::Http(response)))
    }

    /// Queues a transport fault.
    pub fn with_fault(self, fault: TransportError) -> Self {
        self.with_exchange(Err(fault))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .expect("MockHttpTransport: requests lock poisoned")
            .len()
    }

    /// All requested URLs, in order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .expect("MockHttpTransport: requests lock poisoned")
            .clone()
    }

    fn next_exchange(&self, url: &Url) -> MockExchange {
        let scripted = self
            .exchanges
            .lock()
            .expect("MockHttpTransport: exchanges lock poisoned")
            .pop_front();

        scripted.unwrap_or_else(|| {
            let user_name = url
                .query_pairs()
                .find(|(key, _)| key == "userName")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default();
            let body = serde_json::json!({ "isAvailable": true, "userName": user_name });
            Ok(TransportResponse::Http(HttpResponse::new(
                StatusCode::OK,
                body.to_string(),
            )))
        })
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .expect("MockHttpTransport: requests lock poisoned")
            .push(url.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_exchange(url)
    }
}
