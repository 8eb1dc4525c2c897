//! Domain types for LeiBooks
//!
//! This module contains the document-side models:
//! - `document`: Document handle, its metadata and update payload
//! - `page`: Page, Annotation and AnnotationId
//! - `common`: Shared traits and utilities

mod common;
mod document;
mod page;

pub use common::{today, PageNumber, Validator};
pub use document::{Document, DocumentMetadata, DocumentProperties};
pub use page::{Annotation, AnnotationId, Page};
