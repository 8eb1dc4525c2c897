//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "LEIBOOKS_";

const CONFIG_FILE: &str = "config.toml";

/// Loads, saves and overrides the application configuration
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Uses the platform config directory
    ///
    /// - Linux: `~/.config/leibooks/`
    /// - macOS: `~/Library/Application Support/leibooks/`
    /// - Windows: `%APPDATA%\leibooks\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = ProjectDirs::from("", "", "leibooks")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })?;
        Ok(Self::with_directory(config_dir))
    }

    /// Uses `config_dir` instead of the platform directory
    pub fn with_directory(config_dir: PathBuf) -> Self {
        Self {
            persistence: ConfigPersistence::new(config_dir.join(CONFIG_FILE)),
            config_dir,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Path {
        self.persistence.path()
    }

    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, logging and replacing any failure with defaults
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Load, modify and save in one step
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes the defaults if no config file exists yet
    ///
    /// Returns whether a file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            return Ok(false);
        }
        self.save(&Config::default())?;
        log::info!("Generated default config at {}", self.config_path().display());
        Ok(true)
    }

    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Loads the file, then applies `LEIBOOKS_*` environment variables
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }
}

/// Applies overrides looked up by variable name
///
/// Recognised variables:
/// `LEIBOOKS_APP_LOG_LEVEL`, `LEIBOOKS_APP_LOG_FILTER`, `LEIBOOKS_APP_DEBUG_MODE`,
/// `LEIBOOKS_LIBRARY_DEFAULT_AUTHOR`, `LEIBOOKS_LIBRARY_EXTRACT_METADATA`,
/// `LEIBOOKS_LIBRARY_FOLLOW_SYMLINKS`.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| {
        let name = format!("{}{}", ENV_PREFIX, suffix);
        lookup(&name).map(|value| (name, value))
    };

    if let Some((name, value)) = var("APP_LOG_LEVEL") {
        config.app.log_level = value.parse::<LogLevel>().map_err(|e| ConfigError::EnvOverride {
            variable: name,
            value,
            reason: e.message,
        })?;
    }

    if let Some((_, value)) = var("APP_LOG_FILTER") {
        config.app.log_filter = Some(value);
    }

    if let Some((name, value)) = var("APP_DEBUG_MODE") {
        config.app.debug_mode = parse_bool(name, value)?;
    }

    if let Some((_, value)) = var("LIBRARY_DEFAULT_AUTHOR") {
        config.library.default_author = value;
    }

    if let Some((name, value)) = var("LIBRARY_EXTRACT_METADATA") {
        config.library.extract_metadata = parse_bool(name, value)?;
    }

    if let Some((name, value)) = var("LIBRARY_FOLLOW_SYMLINKS") {
        config.library.follow_symlinks = parse_bool(name, value)?;
    }

    if let Err(errors) = config.validate() {
        for error in &errors {
            log::warn!("After environment overrides: {}", error);
        }
    }

    Ok(())
}

fn parse_bool(variable: String, value: String) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvOverride {
            variable,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}
