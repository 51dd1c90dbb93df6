//! Client log events
//!
//! Clients receive an [`EventSink`] at construction and push every
//! noteworthy step of a request through it. The binary wires a
//! [`TracingSink`]; tests use a recording sink.

use std::sync::Arc;
use tracing::Level;

/// One log event emitted by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEvent {
    pub level: Level,
    /// Event name, e.g. `auth::request` or `response`
    pub name: &'static str,
    pub message: String,
}

impl ClientEvent {
    pub fn new(level: Level, name: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            name,
            message: message.into(),
        }
    }
}

/// Receives events emitted by clients
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

/// Shared handle to a sink
pub type SharedSink = Arc<dyn EventSink>;

/// Forwards client events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ClientEvent) {
        let ClientEvent {
            level,
            name,
            message,
        } = event;
        // tracing needs the level at compile time
        match level {
            Level::ERROR => tracing::error!(event = name, "{}", message),
            Level::WARN => tracing::warn!(event = name, "{}", message),
            Level::INFO => tracing::info!(event = name, "{}", message),
            Level::DEBUG => tracing::debug!(event = name, "{}", message),
            _ => tracing::trace!(event = name, "{}", message),
        }
    }
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ClientEvent) {}
}
