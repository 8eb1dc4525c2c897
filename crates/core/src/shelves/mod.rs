//! Shelves: named views over the library
//!
//! - `shelf`: the Shelf type (normal and smart variants) and its event handling
//! - `registry`: the Shelves registry with the built-in smart shelves

mod registry;
mod shelf;

pub use registry::{Shelves, BOOKMARKED_SHELF, RECENT_SHELF, SMART_SHELF_MIME_TYPES};
pub use shelf::{Predicate, Shelf, ShelfType, SmartCriteria};
