//! Response conversion.
//!
//! # Responsibilities
//! - Turn an `OutboundResponse` into an axum response
//! - Turn a handler panic into a well-formed 500
//!
//! # Design Decisions
//! - Status, headers and body are fully known before anything is written

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::invocation::{OutboundResponse, TEXT_PLAIN};

impl IntoResponse for OutboundResponse {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_str(&self.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(TEXT_PLAIN));

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        response
    }
}

/// `CatchPanicLayer` callback: the panic message becomes the 500 body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(detail = %detail, "Function panicked");

    OutboundResponse::text(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Unexpected server error: {}", detail),
    )
    .into_response()
}
