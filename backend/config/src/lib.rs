//! `devconsole-config` — developer console configuration.
//!
//! Provides:
//! - Typed config schema (command prefix, logging)
//! - YAML read/write
//! - `DEVCONSOLE_*` environment overrides
//! - Default value application
//! - Validation with warnings and errors

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use schema::{ConsoleConfig, LoggingConfig};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use env::{apply_env_overrides, apply_env_overrides_with, InvalidEnvVarError};
pub use defaults::{apply_all_defaults, DEFAULT_LOG_LEVEL, DEFAULT_PREFIX};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load, apply env overrides and defaults, then validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<ConsoleConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_and_prepare_with(path, &env).await
}

/// [`load_and_prepare`] with an explicit environment.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<ConsoleConfig> {
    let config = load_unvalidated_with(path, env).await?;
    check_config(&config)?;
    Ok(config)
}

/// Load, apply env overrides and defaults, but do not validate.
///
/// For callers that layer their own overrides (e.g. CLI flags) on top and
/// want to validate the final result once, after logging is set up.
pub async fn load_unvalidated_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<ConsoleConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides_with(config, env)
        .with_context(|| format!("Failed to apply env overrides to {}", path.display()))?;
    Ok(apply_all_defaults(config))
}

/// Validate, log every warning and error, and fail if any error was found.
///
/// Returns the report so callers can inspect the warnings.
pub fn check_config(config: &ConsoleConfig) -> Result<ValidationReport> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        let messages: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid config: {}", messages.join("; "));
    }
    Ok(report)
}
