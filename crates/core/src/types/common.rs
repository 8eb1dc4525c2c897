//! Common types and utilities shared across domain models

use chrono::{Local, NaiveDate};

/// 1-based page number within a document
pub type PageNumber = u32;

/// Today's date in the local timezone
///
/// Every "last modified" bump uses this, and the built-in "Recent" shelf
/// compares against it.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Trait for types that can validate themselves
pub trait Validator {
    /// Validates the instance and returns errors if invalid
    fn validate(&self) -> Result<(), Vec<String>>;

    /// Returns true if the instance is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
