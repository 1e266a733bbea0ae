//! Port for structured adjudication logging.
//!
//! Defines the [`ConversationLogger`] trait for recording adjudication
//! events (prompts, raw responses, fallback substitutions, phase changes)
//! to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! transcript in a machine-readable format (JSONL). Fallback verdicts are
//! always logged with `"fallback": true`.

use serde_json::Value;

/// A structured adjudication event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "adjudication_request", "fallback_verdict").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging adjudication events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures never
/// interrupt a deliberation.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
