//! Config defaults: applies default values to parsed config.

use crate::schema::{ConsoleConfig, LoggingConfig};

/// Default command prefix.
pub const DEFAULT_PREFIX: &str = "/";

/// Default log level when neither config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: ConsoleConfig) -> ConsoleConfig {
    let config = apply_prefix_default(config);
    apply_logging_defaults(config)
}

fn apply_prefix_default(mut config: ConsoleConfig) -> ConsoleConfig {
    if config.prefix.is_none() {
        config.prefix = Some(DEFAULT_PREFIX.to_string());
    }
    config
}

fn apply_logging_defaults(mut config: ConsoleConfig) -> ConsoleConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    if logging.events.is_none() {
        logging.events = Some(true);
    }
    config
}
