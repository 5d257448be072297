//! Port for the structured session transcript.
//!
//! Defines the [`ConversationLogger`] trait for recording session events
//! (session start, every backend call with its full reply, session end) to
//! a machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! transcript in a machine-readable format (JSONL). Nothing reads it back.

use serde_json::Value;

/// A structured transcript event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "session_started", "inference_completed").
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

/// Port for logging transcript events.
///
/// `log` is synchronous and infallible so that a broken log file can never
/// disturb a session; implementations swallow their own I/O errors.
pub trait ConversationLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
