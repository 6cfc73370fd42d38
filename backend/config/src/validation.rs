//! Config validation: checks with user-friendly error messages.

use crate::schema::ConsoleConfig;
use thiserror::Error;

/// Level names accepted on their own (case-insensitive).
const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ConsoleConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_prefix(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_prefix(config: &ConsoleConfig, report: &mut ValidationReport) {
    let Some(prefix) = &config.prefix else { return };
    if prefix.is_empty() {
        report.warn("prefix", "Empty prefix; every input line will be treated as a command");
    }
    if prefix.contains(['\n', '\r']) {
        report.error("prefix", "Prefix cannot contain a line break; no input line could match it");
    }
}

fn validate_logging(config: &ConsoleConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };

    if let Some(level) = &logging.level {
        let level = level.trim();
        // `target=level,...` directives are left for EnvFilter to judge.
        let is_directive = level.contains('=') || level.contains(',');
        if level.is_empty() {
            report.error("logging.level", "Log level cannot be empty");
        } else if !is_directive && !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            report.error(
                "logging.level",
                format!("Unknown log level '{level}'; expected one of {}", LEVELS.join(", ")),
            );
        }
    }

    if let Some(dir) = &logging.dir {
        if dir.as_os_str().is_empty() {
            report.error("logging.dir", "Log directory cannot be empty");
        }
    }
}
