//! Request/response model shared by the hosted functions.
//!
//! Functions never see axum types; the HTTP layer converts at the edge
//! (see `http::response`).

use bytes::Bytes;
use reqwest::StatusCode;
use std::collections::HashMap;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json; charset=utf-8";

/// An inbound function invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest {
    query: HashMap<String, String>,
}

impl InboundRequest {
    /// Build from a raw (still percent-encoded) query string.
    ///
    /// When a name repeats, the first value wins.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut query = HashMap::new();
        if let Some(raw) = raw {
            for (name, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                query.entry(name.into_owned()).or_insert_with(|| value.into_owned());
            }
        }
        Self { query }
    }

    /// Add or replace a query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Look up a query parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// A fully determined function response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
}

impl OutboundResponse {
    pub fn new(status: StatusCode, content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// A `text/plain` response.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::new(status, TEXT_PLAIN, body)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_decoding() {
        let request = InboundRequest::from_query(Some("nombre=Jos%C3%A9+Luis&x=1&x=2"));
        assert_eq!(request.param("nombre"), Some("José Luis"));
        assert_eq!(request.param("x"), Some("1"));
        assert_eq!(request.param("missing"), None);
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(InboundRequest::from_query(None), InboundRequest::default());
        assert_eq!(InboundRequest::from_query(Some("")).param("nombre"), None);
    }

    #[test]
    fn test_text_response() {
        let response = OutboundResponse::text(StatusCode::BAD_GATEWAY, "nope");
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.content_type, TEXT_PLAIN);
        assert_eq!(response.body_text(), "nope");
    }
}
