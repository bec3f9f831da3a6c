//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the function routes
//! - Wire up middleware (tracing, request timeout, request ID, panic capture)
//! - Bind server to listener
//! - Dispatch invocations to the forwarding and greeting functions

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::FunctionAppConfig;
use crate::forwarding::{ForwardingHandler, ReqwestUpstream};
use crate::greeting::GreetingHandler;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::http::response::panic_response;
use crate::invocation::{InboundRequest, OutboundResponse};
use crate::observability::{EventSink, TracingSink};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<ForwardingHandler>,
    pub greeter: Arc<GreetingHandler>,
}

/// HTTP host for the functions.
pub struct HttpServer {
    router: Router,
    config: FunctionAppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: FunctionAppConfig) -> Self {
        Self::with_parts(config, reqwest::Client::new(), Arc::new(TracingSink))
    }

    /// Create a server around an explicit outbound client and event sink.
    ///
    /// `client` is shared by every invocation (one connection pool).
    pub fn with_parts(
        config: FunctionAppConfig,
        client: reqwest::Client,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let forwarder = ForwardingHandler::new(
            config.upstream.clone(),
            ReqwestUpstream::new(client),
            sink.clone(),
        );

        let state = AppState {
            forwarder: Arc::new(forwarder),
            greeter: Arc::new(GreetingHandler::new(sink)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    fn build_router(config: &FunctionAppConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route(&config.routes.forward_path, get(saludo_function))
            .route(
                &config.routes.greeting_path,
                get(greeting_function).post(greeting_function),
            )
            .route(&config.routes.health_path, get(health))
            .with_state(state);

        apply_layers(routes, config)
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            forward_path = %self.config.routes.forward_path,
            greeting_path = %self.config.routes.greeting_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FunctionAppConfig {
        &self.config
    }
}

/// Host middleware, outermost last.
#[allow(deprecated)]
fn apply_layers(router: Router, config: &FunctionAppConfig) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(RequestIdLayer)
        .layer(TraceLayer::new_for_http())
}

async fn saludo_function(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> OutboundResponse {
    tracing::debug!(request_id = %headers.request_id(), "Invoking forwarding function");
    let request = InboundRequest::from_query(query.as_deref());
    state.forwarder.handle(&request).await
}

async fn greeting_function(State(state): State<AppState>, headers: HeaderMap) -> OutboundResponse {
    tracing::debug!(request_id = %headers.request_id(), "Invoking greeting function");
    state.greeter.handle()
}

async fn health() -> &'static str {
    "Healthy"
}
