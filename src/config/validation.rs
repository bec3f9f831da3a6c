//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FunctionAppConfig → Result<(), Vec<ValidationError>>
//! - Upstream settings are not checked here; the forwarding function answers
//!   500 for a missing or malformed upstream, so the host still starts

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::FunctionAppConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}': not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("invalid route path '{0}': must start with '/'")]
    InvalidRoutePath(String),

    #[error("route path '{0}' is used by more than one function")]
    DuplicateRoute(String),

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("upstream.forwarded_query_params contains an empty name")]
    EmptyQueryParam,

    #[error("upstream.forwarded_query_params lists '{0}' more than once")]
    DuplicateQueryParam(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &FunctionAppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let routes = [
        &config.routes.forward_path,
        &config.routes.greeting_path,
        &config.routes.health_path,
    ];
    for (i, path) in routes.iter().enumerate() {
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidRoutePath(path.to_string()));
        }
        if routes[..i].contains(path) {
            errors.push(ValidationError::DuplicateRoute(path.to_string()));
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let params = &config.upstream.forwarded_query_params;
    if params.iter().any(|p| p.trim().is_empty()) {
        errors.push(ValidationError::EmptyQueryParam);
    }
    for (i, name) in params.iter().enumerate() {
        // Report each repeated name once.
        if params[..i].iter().filter(|p| *p == name).count() == 1 {
            errors.push(ValidationError::DuplicateQueryParam(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
