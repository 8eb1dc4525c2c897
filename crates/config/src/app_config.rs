//! Application-level configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Log level for application logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn all() -> [LogLevel; 6] {
        [
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Off => write!(f, "off"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LogLevel::all()
            .into_iter()
            .find(|level| level.to_string() == wanted)
            .ok_or_else(|| {
                let names: Vec<String> = LogLevel::all().iter().map(ToString::to_string).collect();
                ValidationError::with_value(
                    "app.log_level",
                    format!("must be one of: {}", names.join(", ")),
                    s,
                )
            })
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum level written to the log
    pub log_level: LogLevel,

    /// Extra `env_logger` directives, e.g. `leibooks_core=trace`
    pub log_filter: Option<String>,

    /// Raises the effective level to at least `debug`
    pub debug_mode: bool,
}

impl AppConfig {
    /// Level actually handed to the logger
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug_mode && matches!(
            self.log_level,
            LogLevel::Off | LogLevel::Error | LogLevel::Warn | LogLevel::Info
        ) {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_filter: None,
            debug_mode: false,
        }
    }
}

impl ConfigSection for AppConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = Vec::new();

        if let Some(filter) = &self.log_filter {
            results.push(Validator::not_empty(filter, "app.log_filter"));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.log_level = other.log_level;
        self.log_filter = other.log_filter;
        self.debug_mode = other.debug_mode;
    }

    fn section_name(&self) -> &'static str {
        "app"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.section_name(), "app");
    }

    #[test]
    fn test_blank_filter_rejected() {
        let config = AppConfig {
            log_filter: Some("  ".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_mode_raises_level() {
        let mut config = AppConfig::default();
        assert_eq!(config.effective_log_level(), LogLevel::Info);

        config.debug_mode = true;
        assert_eq!(config.effective_log_level(), LogLevel::Debug);

        config.log_level = LogLevel::Trace;
        assert_eq!(config.effective_log_level(), LogLevel::Trace);
    }

    #[test]
    fn test_merge() {
        let mut base = AppConfig::default();
        let other = AppConfig {
            log_level: LogLevel::Warn,
            log_filter: Some("leibooks_core=trace".to_string()),
            debug_mode: true,
        };

        base.merge(other.clone());
        assert_eq!(base, other);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" TRACE ".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(log::LevelFilter::from(LogLevel::Off), log::LevelFilter::Off);
        assert_eq!(log::LevelFilter::from(LogLevel::Debug), log::LevelFilter::Debug);
    }
}
