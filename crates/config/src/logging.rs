//! Logger bootstrap
//!
//! Every crate logs through the `log` facade; the binary embedding the
//! library calls [`init_logging`] once with its loaded [`AppConfig`].

use crate::AppConfig;
use env_logger::Builder;

/// Builds an `env_logger` builder from the config
///
/// `RUST_LOG` still wins over the configured filter when set.
pub fn logger_builder(config: &AppConfig) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(config.effective_log_level().into());

    if let Some(filter) = &config.log_filter {
        builder.parse_filters(filter);
    }

    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }

    builder
}

/// Installs the global logger
///
/// Returns false when a logger was already installed; the existing one is kept.
pub fn init_logging(config: &AppConfig) -> bool {
    match logger_builder(config).try_init() {
        Ok(()) => {
            log::debug!("Logging initialised at {}", config.effective_log_level());
            true
        }
        Err(_) => false,
    }
}
