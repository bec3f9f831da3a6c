//! Function-level event reporting.
//!
//! The functions log through an injected `EventSink` instead of calling
//! `tracing` directly, so embedders and tests can capture what a single
//! invocation reported.

use std::sync::Mutex;
use tracing::Level;

/// Destination for function log events.
pub trait EventSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Production sink: forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "saludo_gateway::functions", "{}", message),
            Level::WARN => tracing::warn!(target: "saludo_gateway::functions", "{}", message),
            Level::INFO => tracing::info!(target: "saludo_gateway::functions", "{}", message),
            Level::DEBUG => tracing::debug!(target: "saludo_gateway::functions", "{}", message),
            _ => tracing::trace!(target: "saludo_gateway::functions", "{}", message),
        }
    }
}

/// Sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().expect("event sink mutex poisoned").clone()
    }

    /// Messages logged at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl EventSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        self.events
            .lock()
            .expect("event sink mutex poisoned")
            .push((level, message.to_string()));
    }
}
