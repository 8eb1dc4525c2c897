//! File system persistence for configuration
//!
//! Saves go through a temporary file in the target directory and an atomic
//! rename, after copying the previous file to `config.toml.backup`.

use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads and writes one config file
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.config_path.with_extension("toml.backup")
    }

    /// Loads the config file
    ///
    /// A missing file yields the defaults. An empty or malformed file is an
    /// error. Values that parse but fail validation are logged and kept so
    /// the user can fix them.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "No config file at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "config file is empty",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })?;

        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("{}: {}", self.config_path.display(), error);
            }
        }

        Ok(config)
    }

    /// Validates and writes `config` atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config.validate().map_err(ConfigError::Invalid)?;

        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: format!("{} has no parent directory", self.config_path.display()),
            })?;
        Self::ensure_directory_exists(dir)?;

        if self.config_path.exists() {
            fs::copy(&self.config_path, self.backup_path())
                .map_err(|source| ConfigError::BackupError { source })?;
            log::debug!("Backed up config to {}", self.backup_path().display());
        }

        let toml_string = toml::to_string_pretty(config)?;

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(toml_string.as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    fn ensure_directory_exists(path: &Path) -> ConfigResult<()> {
        if path.as_os_str().is_empty() || path.exists() {
            return Ok(());
        }
        fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Created config directory: {}", path.display());
        Ok(())
    }
}
