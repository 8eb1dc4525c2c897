//! LeiBooks core model
//!
//! Documents, the library that holds them and the shelves that view it,
//! kept consistent by synchronous event propagation.

pub mod error;
pub mod events;
pub mod library;
pub mod shelves;
pub mod subject;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, ErrorSeverity, Result};
pub use events::{DocumentEvent, LibraryEvent, ShelfEvent};
pub use library::Library;
pub use shelves::{Predicate, Shelf, ShelfType, Shelves, BOOKMARKED_SHELF, RECENT_SHELF};
pub use subject::{Listener, Subject};
pub use types::{
    today, Annotation, AnnotationId, Document, DocumentMetadata, DocumentProperties, Page,
    PageNumber, Validator,
};
