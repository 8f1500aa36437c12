//! Reqwest Transport - Implementation of HttpTransport with `reqwest`.

use async_trait::async_trait;
use http::header::ACCEPT;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::ports::{HttpResponse, HttpTransport, TransportError, TransportResponse};

/// HTTP transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Maps a reqwest failure onto a transport fault.
    fn fault(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::timeout(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            TransportError::connect(format!("Connection failed: {}", error))
        } else {
            TransportError::other(error.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.fault(e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.fault(e))?;

        Ok(TransportResponse::Http(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        }))
    }
}
