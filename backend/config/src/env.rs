//! Environment overrides for config values.
//!
//! `DEVCONSOLE_*` variables win over the config file. Empty values are
//! treated as unset.

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::schema::{ConsoleConfig, LoggingConfig};

pub const ENV_PREFIX: &str = "DEVCONSOLE_PREFIX";
pub const ENV_LOG_LEVEL: &str = "DEVCONSOLE_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "DEVCONSOLE_LOG_JSON";
pub const ENV_LOG_DIR: &str = "DEVCONSOLE_LOG_DIR";

/// Error returned when an override cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value {value:?} for env var \"{var_name}\": expected {expected}")]
pub struct InvalidEnvVarError {
    pub var_name: String,
    pub value: String,
    pub expected: &'static str,
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: ConsoleConfig) -> Result<ConsoleConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides using a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: ConsoleConfig,
    env: &HashMap<String, String>,
) -> Result<ConsoleConfig> {
    let get = |name: &str| env.get(name).filter(|v| !v.is_empty());

    // Taken verbatim: surrounding spaces are part of the prefix.
    if let Some(prefix) = get(ENV_PREFIX) {
        config.prefix = Some(prefix.clone());
    }

    if let Some(level) = get(ENV_LOG_LEVEL) {
        logging(&mut config).level = Some(level.trim().to_string());
    }

    if let Some(raw) = get(ENV_LOG_JSON) {
        logging(&mut config).json = Some(parse_bool(ENV_LOG_JSON, raw)?);
    }

    if let Some(dir) = get(ENV_LOG_DIR) {
        logging(&mut config).dir = Some(PathBuf::from(dir));
    }

    Ok(config)
}

fn logging(config: &mut ConsoleConfig) -> &mut LoggingConfig {
    config.logging.get_or_insert_with(LoggingConfig::default)
}

fn parse_bool(var_name: &str, raw: &str) -> Result<bool, InvalidEnvVarError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(InvalidEnvVarError {
            var_name: var_name.to_string(),
            value: raw.to_string(),
            expected: "a boolean (true/false, 1/0, yes/no, on/off)",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn overrides_file_values() {
        let config = ConsoleConfig { prefix: Some("/".into()), logging: None };
        let config = apply_env_overrides_with(
            config,
            &env(&[
                (ENV_PREFIX, "!"),
                (ENV_LOG_LEVEL, "debug"),
                (ENV_LOG_JSON, "yes"),
                (ENV_LOG_DIR, "/var/log/devconsole"),
            ]),
        )
        .unwrap();

        assert_eq!(config.prefix(), "!");
        assert_eq!(config.log_level(), "debug");
        assert!(config.log_json());
        assert_eq!(config.log_dir(), Some(&PathBuf::from("/var/log/devconsole")));
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = ConsoleConfig { prefix: Some("/".into()), logging: None };
        let config = apply_env_overrides_with(config, &env(&[(ENV_PREFIX, "")])).unwrap();
        assert_eq!(config.prefix(), "/");
        assert!(config.logging.is_none());
    }

    #[test]
    fn rejects_malformed_bool() {
        let err = apply_env_overrides_with(ConsoleConfig::default(), &env(&[(ENV_LOG_JSON, "maybe")]))
            .unwrap_err();
        let err = err.downcast::<InvalidEnvVarError>().unwrap();
        assert_eq!(err.var_name, ENV_LOG_JSON);
        assert_eq!(err.value, "maybe");
    }
}
