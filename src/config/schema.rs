//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the function host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the function host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FunctionAppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream gateway endpoint and credentials.
    pub upstream: UpstreamConfig,

    /// Route paths for the hosted functions.
    pub routes: RoutesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:7071").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7071".to_string(),
        }
    }
}

/// Upstream (API gateway) configuration.
///
/// Both the endpoint and the key may be absent here; the forwarding function
/// rejects such requests itself instead of refusing to start.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the gateway-managed API.
    pub endpoint_url: Option<String>,

    /// Subscription key sent as `Ocp-Apim-Subscription-Key`.
    pub subscription_key: Option<String>,

    /// Inbound query parameters merged into the upstream URL.
    pub forwarded_query_params: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            subscription_key: None,
            forwarded_query_params: vec!["nombre".to_string()],
        }
    }
}

impl UpstreamConfig {
    /// Endpoint and key, when both are set to something other than blanks.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(&self.endpoint_url)?,
            non_empty(&self.subscription_key)?,
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// Hand-written so the key never lands in logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field(
                "subscription_key",
                &self.subscription_key.as_ref().map(|_| "<redacted>"),
            )
            .field("forwarded_query_params", &self.forwarded_query_params)
            .finish()
    }
}

/// Route paths, following the `/api/<FunctionName>` convention.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path of the forwarding function.
    pub forward_path: String,

    /// Path of the static greeting function.
    pub greeting_path: String,

    /// Liveness probe path.
    pub health_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            forward_path: "/api/SaludoFunction".to_string(),
            greeting_path: "/api/Greeting".to_string(),
            health_path: "/health".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Host-level request timeout in seconds.
    ///
    /// This bounds the whole invocation; the outbound call itself keeps
    /// the transport defaults.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 230 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
