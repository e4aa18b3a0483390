//! Executes plain-data requests against the network.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs the round-trip between a built `HttpRequest` and the
/// `HttpResponse` handed to the parser.
///
/// Implementations must return non-2xx responses as `Ok`; only failures to
/// obtain a response at all are errors, reported as `ApiError::Network`.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// Timeouts applied to the underlying HTTP client. `None` keeps the
/// client's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Network(format!("request to {} timed out", request.url))
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response body: {e}")))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
