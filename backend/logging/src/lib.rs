//! Telemetry and structured logging for the developer console.
//!
//! Handles subscriber setup, argument redaction and per-line console event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ConsoleEvent, EventLogEntry, EventLogger};
pub use logger::{init_logger, LoggerOptions};
pub use redact::{redact_args, redact_sensitive_data};
