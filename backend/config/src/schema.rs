//! Developer console configuration schema.
//!
//! Every field is optional so a partial YAML file (or none at all) is valid;
//! `defaults::apply_all_defaults` fills in the rest.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults::{DEFAULT_LOG_LEVEL, DEFAULT_PREFIX};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// String that marks a line as a command (e.g. "/").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// JSON console output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    /// Directory for rolling log files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Record one structured event per input line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<bool>,
}

impl ConsoleConfig {
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.logging.as_ref().and_then(|l| l.dir.as_ref())
    }

    pub fn log_events(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.events).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = "prefix: \"!\"\nlogging:\n  level: debug\n  json: true\n  dir: /tmp/logs\n";
        let config: ConsoleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.prefix(), "!");
        assert_eq!(config.log_level(), "debug");
        assert!(config.log_json());
        assert_eq!(config.log_dir(), Some(&PathBuf::from("/tmp/logs")));
        assert!(config.log_events());
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.prefix(), "/");
        assert_eq!(config.log_level(), "info");
        assert!(!config.log_json());
        assert!(config.log_dir().is_none());
    }

    #[test]
    fn skips_unset_fields_when_serializing() {
        let config = ConsoleConfig { prefix: Some("/".into()), logging: None };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("logging"));
        let back: ConsoleConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
