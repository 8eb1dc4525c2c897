//! Boundary façades a user interface talks to
//!
//! Each controller wraps one model handle, forwards calls to it, and relays
//! the model's events to its own listeners as [`LibraryEvent`]s.
//!
//! [`LibraryEvent`]: leibooks_core::LibraryEvent

mod library_controller;
mod shelves_controller;

pub use library_controller::LibraryController;
pub use shelves_controller::ShelvesController;
