//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording pipeline events
//! (requests, generated markup, compilation results, failures) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! generation transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event for logging.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "generation_completed", "generation_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events to a structured log.
///
/// The `log` method is intentionally synchronous and non-fallible to avoid
/// disrupting the pipeline — logging failures are silently ignored.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
