//! Structured Logger
//!
//! Wraps `tracing` to provide plain or JSON console output, optional daily
//! rolling NDJSON files, and environment-based level control.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix for rolling log files.
const LOG_FILE_NAME: &str = "devconsole.log";

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON on the console instead of human-readable lines.
    pub json: bool,
    /// Directory for daily rolling NDJSON files. `None` disables file output.
    pub dir: Option<PathBuf>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false, dir: None }
    }
}

/// Initialize the global structured logger.
///
/// Console output goes to stderr so it never mixes with command output on
/// stdout. Calling this more than once is harmless.
pub fn init_logger(options: &LoggerOptions) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.level));

    let console_layer = if options.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
            .boxed()
    };

    // Rolling file appender: writes NDJSON to `<dir>/devconsole.log.YYYY-MM-DD`
    let file_layer = options.dir.as_ref().map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        let options = LoggerOptions { level: "debug".into(), ..Default::default() };
        init_logger(&options);
        init_logger(&options);
    }
}
