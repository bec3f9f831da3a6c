//! The static greeting function.

use reqwest::StatusCode;
use std::sync::Arc;
use tracing::Level;

use crate::invocation::OutboundResponse;
use crate::observability::{metrics, EventSink};

pub const GREETING: &str = "Welcome to Azure Functions!";

pub struct GreetingHandler {
    sink: Arc<dyn EventSink>,
}

impl GreetingHandler {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    pub fn handle(&self) -> OutboundResponse {
        self.sink
            .log(Level::INFO, "Greeting function processed a request.");
        metrics::record_greeting();
        OutboundResponse::text(StatusCode::OK, GREETING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::TEXT_PLAIN;
    use crate::observability::MemorySink;

    #[test]
    fn test_fixed_greeting() {
        let sink = Arc::new(MemorySink::new());
        let response = GreetingHandler::new(sink.clone()).handle();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type, TEXT_PLAIN);
        assert_eq!(response.body_text(), GREETING);
        assert_eq!(sink.messages_at(Level::INFO).len(), 1);
    }
}
