//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A missing upstream is only a warning; the forwarding function answers 500
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::config::{load_config, ObservabilityConfig};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::{logging, metrics};

/// Command-line inputs to startup.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub bind_address: Option<String>,
}

/// Start the host and serve until a termination signal arrives.
///
/// Every fatal error is logged before it is returned.
pub async fn start(options: StartupOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match load_config(options.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // No usable observability settings yet: log with the defaults.
            logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    if let Some(bind) = options.bind_address {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "saludo-gateway starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    if !config.upstream.is_configured() {
        tracing::warn!("Upstream endpoint or subscription key not configured; forwarding requests will fail with 500");
    }

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse::<SocketAddr>().map_err(|e| {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            );
            e
        })?;
        metrics::init_metrics(addr).map_err(|e| {
            tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter");
            e
        })?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|e| {
            tracing::error!(
                address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            e
        })?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal_task = signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await.map_err(|e| {
        tracing::error!(error = %e, "HTTP server failed");
        e
    })?;

    signal_task.abort();
    tracing::info!("Shutdown complete");
    Ok(())
}
