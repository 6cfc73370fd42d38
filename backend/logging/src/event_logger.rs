//! Console Event Logger
//!
//! One structured event per input line, emitted on the `console_events`
//! target so it can be routed to its own NDJSON file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::{redact_args, redact_sensitive_data};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    /// A line without the command prefix.
    LineReceived { text: String },
    CommandHandled { word: String, args: Vec<String>, attempts: usize },
    CommandDeclined { word: String, args: Vec<String>, attempts: usize },
    CommandUnknown { word: String },
}

impl ConsoleEvent {
    /// Scrub secrets from every word, argument and line the event carries.
    pub fn redacted(self) -> Self {
        match self {
            ConsoleEvent::LineReceived { text } => {
                ConsoleEvent::LineReceived { text: redact_sensitive_data(&text) }
            }
            ConsoleEvent::CommandHandled { word, args, attempts } => ConsoleEvent::CommandHandled {
                word: redact_sensitive_data(&word),
                args: redact_args(&args),
                attempts,
            },
            ConsoleEvent::CommandDeclined { word, args, attempts } => ConsoleEvent::CommandDeclined {
                word: redact_sensitive_data(&word),
                args: redact_args(&args),
                attempts,
            },
            ConsoleEvent::CommandUnknown { word } => {
                ConsoleEvent::CommandUnknown { word: redact_sensitive_data(&word) }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ConsoleEvent,
}

impl EventLogEntry {
    pub fn new(session_id: &str, event: ConsoleEvent) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event: event.redacted(),
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a console event after redaction.
    pub fn log_event(session_id: &str, event: ConsoleEvent) {
        let entry = EventLogEntry::new(session_id, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "console_events", event = %json, "Console event"),
            Err(_) => info!(target: "console_events", event = ?entry, "Console event"),
        }
    }
}
