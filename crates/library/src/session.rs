// FILE: crates/library/src/session.rs

use crate::controller::{LibraryController, ShelvesController};
use crate::error::LibraryResult;
use crate::import::DocumentImporter;
use leibooks_config::{logging, Config, ConfigManager};
use leibooks_core::{Library, Shelves};
use std::rc::Rc;

/// A configured library with both controllers wired to it
pub struct Session {
    config: Config,
    library: Rc<LibraryController>,
    shelves: Rc<ShelvesController>,
}

impl Session {
    /// Opens the platform configuration directory
    ///
    /// # Errors
    ///
    /// `Config` when the directory cannot be resolved or the file is invalid.
    pub fn open_default() -> LibraryResult<Self> {
        Self::open(&ConfigManager::new()?)
    }

    /// Writes a default config file if none exists, loads it with
    /// `LEIBOOKS_*` overrides, installs the logger and builds an empty library
    ///
    /// # Errors
    ///
    /// `Config` when the file cannot be written or read.
    pub fn open(manager: &ConfigManager) -> LibraryResult<Self> {
        manager.initialize()?;
        let config = manager.load_with_env_overrides()?;

        if !logging::init_logging(&config.app) {
            log::debug!("Logger already installed");
        }

        let library = Library::new();
        let shelves = ShelvesController::new(Shelves::new(library.clone())?);
        let importer = DocumentImporter::with_config(&config.library);
        let controller = LibraryController::new(library, importer);

        log::info!("Session opened with {}", manager.config_path().display());
        Ok(Self {
            config,
            library: controller,
            shelves,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn library(&self) -> &Rc<LibraryController> {
        &self.library
    }

    pub fn shelves(&self) -> &Rc<ShelvesController> {
        &self.shelves
    }
}
