//! LeiBooks configuration
//!
//! Settings live in one TOML file split into sections, each implementing
//! [`ConfigSection`]. Files are written atomically and validated before
//! every save; `LEIBOOKS_*` environment variables override file values.
//!
//! # Example
//!
//! ```rust,no_run
//! use leibooks_config::{logging, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("config directory");
//! let config = manager.load_or_default();
//! logging::init_logging(&config.app);
//! println!("Default author: {}", config.library.default_author);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

pub mod logging;

// Config sections
mod app_config;
mod library_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{apply_overrides, ConfigManager, ENV_PREFIX};
pub use persistence::ConfigPersistence;
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use library_config::{LibraryConfig, UNKNOWN_AUTHOR};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: u32,

    /// Logging and diagnostics
    pub app: AppConfig,

    /// Document import
    pub library: LibraryConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every section, returning all problems found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.version == 0 || self.version > CONFIG_VERSION {
            errors.push(ValidationError::with_value(
                "version",
                format!("must be between 1 and {}", CONFIG_VERSION),
                self.version,
            ));
        }

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.library.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Overwrites every section with `other`'s
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.library.merge(other.library);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            library: LibraryConfig::default(),
        }
    }
}
