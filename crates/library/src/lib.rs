//! LeiBooks library services
//!
//! Everything between files on disk and the core model: metadata readers,
//! the document importer and the controllers a user interface drives.
//!
//! [`Session::open`] reads the configuration, installs the logger and wires
//! the controllers together:
//!
//! ```rust,no_run
//! use leibooks_config::ConfigManager;
//! use leibooks_library::Session;
//!
//! let manager = ConfigManager::new().expect("config directory");
//! let session = Session::open(&manager).expect("session");
//! session.library().import_document("Notes", "/home/me/notes.txt");
//! println!("{}", session.shelves());
//! ```
//!
//! The same wiring by hand:
//!
//! ```rust,no_run
//! use leibooks_core::{Library, Shelves};
//! use leibooks_library::{DocumentImporter, LibraryController, ShelvesController};
//!
//! let library = Library::new();
//! let shelves = ShelvesController::new(Shelves::new(library.clone()).expect("built-in shelves"));
//! let controller = LibraryController::new(library, DocumentImporter::new());
//!
//! if let Some(document) = controller.import_document("Notes", "/home/me/notes.txt") {
//!     println!("Imported {}", document);
//! }
//! println!("{}", shelves);
//! ```

pub mod controller;
pub mod error;
pub mod import;
pub mod metadata;
pub mod session;

pub use controller::{LibraryController, ShelvesController};
pub use error::{LibraryError, LibraryResult};
pub use import::DocumentImporter;
pub use metadata::{
    ExtractedMetadata, GenericMetadataReader, MetadataReader, MetadataReaders, PdfMetadataReader,
};
pub use session::Session;
