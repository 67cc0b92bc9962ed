//! Outbound HTTP transport used by rate providers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::FxConfig;
use crate::error::{FxError, FxResult};

/// Raw HTTP response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 200 response with a JSON body.
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport contract for issuing a single GET request.
///
/// Timeouts and cancellation belong to the implementation; callers see a
/// failed request as `FxError::UpstreamUnavailable`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> FxResult<HttpResponse>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    /// Build a client honouring the configured timeouts and user agent.
    pub fn new(config: &FxConfig) -> FxResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FxError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> FxResult<HttpResponse> {
        let mut builder = self.client.get(url);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FxError::UpstreamUnavailable(format!("request timeout: {}", e))
            } else if e.is_connect() {
                FxError::UpstreamUnavailable(format!("connection failed: {}", e))
            } else {
                FxError::UpstreamUnavailable(format!("request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            FxError::UpstreamUnavailable(format!("failed to read response body: {}", e))
        })?;

        Ok(HttpResponse { status, body })
    }
}
