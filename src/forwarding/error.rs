//! Forwarding failures and their mapping to responses.

use bytes::Bytes;
use reqwest::StatusCode;
use std::error::Error as StdError;
use thiserror::Error;

use crate::invocation::OutboundResponse;

/// A network-level failure reaching the upstream.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(describe(&err))
    }
}

/// Render an error with its whole source chain ("a: b: c").
///
/// reqwest keeps the useful part ("Connection refused") in the sources.
pub fn describe(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Why a forward did not produce a relayed success.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("upstream endpoint URL or subscription key is not configured")]
    MissingConfiguration,

    #[error("upstream endpoint URL '{url}' is not valid: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("upstream responded with status {status}")]
    Upstream { status: StatusCode, body: Bytes },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Unexpected(String),
}

/// Coarse error category, used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Upstream,
    Transport,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::Transport => "transport_error",
            ErrorKind::Unexpected => "unexpected_error",
        }
    }
}

impl ForwardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForwardError::MissingConfiguration | ForwardError::InvalidEndpoint { .. } => {
                ErrorKind::Configuration
            }
            ForwardError::Upstream { .. } => ErrorKind::Upstream,
            ForwardError::Transport(_) => ErrorKind::Transport,
            ForwardError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<&ForwardError> for OutboundResponse {
    fn from(err: &ForwardError) -> Self {
        match err {
            ForwardError::MissingConfiguration => OutboundResponse::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal configuration error. Please contact the administrator.",
            ),
            ForwardError::InvalidEndpoint { .. } => OutboundResponse::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal configuration error (upstream URL).",
            ),
            ForwardError::Upstream { status, body } => OutboundResponse::text(
                *status,
                format!(
                    "Upstream service call failed: {}. Details: {}",
                    status.canonical_reason().unwrap_or("Unknown Status"),
                    String::from_utf8_lossy(body)
                ),
            ),
            ForwardError::Transport(e) => OutboundResponse::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Exception while connecting to the upstream service: {}", e),
            ),
            ForwardError::Unexpected(message) => OutboundResponse::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unexpected server error: {}", message),
            ),
        }
    }
}
