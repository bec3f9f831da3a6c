//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Functions produce:
//!     → events.rs (EventSink, forwarded to tracing in production)
//!     → metrics.rs (counters, histograms)
//!
//! Host produces:
//!     → tracing spans from tower-http TraceLayer
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod events;
pub mod logging;
pub mod metrics;

pub use events::{EventSink, MemorySink, TracingSink};
