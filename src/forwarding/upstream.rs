//! Outbound calls to the gateway-managed API.
//!
//! # Responsibilities
//! - Define the `UpstreamClient` seam the forwarding function calls through
//! - Provide the production implementation on a shared `reqwest::Client`
//!
//! # Design Decisions
//! - One GET per invocation, no retries, transport default timeouts
//! - The body is read fully before the response is handed back

use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use std::future::Future;
use url::Url;

use crate::forwarding::error::{ForwardError, TransportError};

/// Header carrying the gateway subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// A GET to be issued against the upstream.
#[derive(Clone)]
pub struct UpstreamRequest {
    pub url: Url,
    pub subscription_key: String,
}

impl std::fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamRequest")
            .field("url", &self.url.as_str())
            .field("subscription_key", &"<redacted>")
            .finish()
    }
}

/// What came back from the upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Outbound HTTP client used by the forwarding function.
///
/// Errors are `ForwardError::Transport` for network failures and
/// `ForwardError::Unexpected` for anything that prevents the request
/// from being built.
pub trait UpstreamClient: Send + Sync {
    fn get(
        &self,
        request: UpstreamRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, ForwardError>> + Send;
}

/// `UpstreamClient` backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestUpstream {
    client: reqwest::Client,
}

impl ReqwestUpstream {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl UpstreamClient for ReqwestUpstream {
    async fn get(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ForwardError> {
        let key = HeaderValue::from_str(&request.subscription_key).map_err(|e| {
            ForwardError::Unexpected(format!("subscription key is not a valid header value: {}", e))
        })?;

        let response = self
            .client
            .get(request.url)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(TransportError::from)?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
