//! The forwarding function.
//!
//! Relays an inbound GET to the gateway-managed upstream and maps whatever
//! comes back (or fails) onto an `OutboundResponse`. `handle` never fails:
//! every path ends in a fully determined response.

use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::Level;

use crate::config::UpstreamConfig;
use crate::forwarding::error::ForwardError;
use crate::forwarding::target::{merge_query_params, parse_endpoint};
use crate::forwarding::upstream::{ReqwestUpstream, UpstreamClient, UpstreamRequest, UpstreamResponse};
use crate::invocation::{InboundRequest, OutboundResponse, APPLICATION_JSON};
use crate::observability::{metrics, EventSink};

pub struct ForwardingHandler<C = ReqwestUpstream> {
    settings: UpstreamConfig,
    client: C,
    sink: Arc<dyn EventSink>,
}

impl<C: UpstreamClient> ForwardingHandler<C> {
    pub fn new(settings: UpstreamConfig, client: C, sink: Arc<dyn EventSink>) -> Self {
        Self {
            settings,
            client,
            sink,
        }
    }

    /// Serve one invocation.
    pub async fn handle(&self, request: &InboundRequest) -> OutboundResponse {
        let start = Instant::now();
        self.sink.log(Level::INFO, "Forwarding function processing an HTTP request.");

        let (outcome, response) = match self.forward(request).await {
            Ok(upstream) => ("success", relay(upstream)),
            Err(err) => {
                self.report(&err);
                (err.kind().as_str(), OutboundResponse::from(&err))
            }
        };

        metrics::record_forward(outcome, response.status.as_u16(), start);
        response
    }

    async fn forward(&self, request: &InboundRequest) -> Result<UpstreamResponse, ForwardError> {
        let (endpoint, key) = self
            .settings
            .credentials()
            .ok_or(ForwardError::MissingConfiguration)?;
        let url = parse_endpoint(endpoint)?;

        let names = &self.settings.forwarded_query_params;
        let overrides: Vec<(&str, &str)> = names
            .iter()
            .enumerate()
            .filter(|(i, name)| !names[..*i].contains(*name))
            .filter_map(|(_, name)| {
                request
                    .param(name)
                    .filter(|v| !v.is_empty())
                    .map(|v| (name.as_str(), v))
            })
            .collect();
        for (name, value) in &overrides {
            self.sink.log(
                Level::INFO,
                &format!("Passing '{}={}' to the upstream service.", name, value),
            );
        }
        let url = merge_query_params(url, &overrides);

        self.sink
            .log(Level::INFO, &format!("Calling upstream service at {}", url));

        let upstream = self
            .client
            .get(UpstreamRequest {
                url,
                subscription_key: key.to_string(),
            })
            .await?;

        if !upstream.status.is_success() {
            return Err(ForwardError::Upstream {
                status: upstream.status,
                body: upstream.body,
            });
        }

        self.sink.log(
            Level::INFO,
            &format!("Upstream call succeeded. Status: {}.", upstream.status),
        );
        self.sink.log(
            Level::DEBUG,
            &format!("Upstream response body: {}", String::from_utf8_lossy(&upstream.body)),
        );
        Ok(upstream)
    }


    fn report(&self, err: &ForwardError) {
        let message = match err {
            ForwardError::MissingConfiguration => {
                "Upstream endpoint URL or subscription key is not configured.".to_string()
            }
            ForwardError::InvalidEndpoint { url, reason } => {
                format!("Upstream base URL ('{}') is not valid: {}", url, reason)
            }
            ForwardError::Upstream { status, body } => format!(
                "Upstream call failed. Status: {}. Response: {}",
                status,
                String::from_utf8_lossy(body)
            ),
            ForwardError::Transport(e) => {
                format!("Transport error while calling the upstream service: {}", e)
            }
            ForwardError::Unexpected(e) => {
                format!("Unexpected error while calling the upstream service: {}", e)
            }
        };
        self.sink.log(Level::ERROR, &message);
    }
}

/// Successful upstream exchange → 200 with the upstream body verbatim.
fn relay(upstream: UpstreamResponse) -> OutboundResponse {
    OutboundResponse::new(
        StatusCode::OK,
        upstream
            .content_type
            .unwrap_or_else(|| APPLICATION_JSON.to_string()),
        upstream.body,
    )
}
