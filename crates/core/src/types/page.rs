//! Page and annotation domain models

use crate::types::PageNumber;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of an annotation, unique within its page
///
/// Ids start at 1, grow monotonically and are never reused, even after the
/// annotation they named is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnnotationId(u32);

impl AnnotationId {
    /// Wraps a raw id
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text annotation attached to a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    text: String,
}

impl Annotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A page of a document: a bookmark flag plus its annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    number: PageNumber,
    bookmarked: bool,
    annotations: BTreeMap<AnnotationId, Annotation>,
    last_annotation_id: u32,
}

impl Page {
    /// Creates an empty, unbookmarked page
    pub fn new(number: PageNumber) -> Self {
        Self {
            number,
            bookmarked: false,
            annotations: BTreeMap::new(),
            last_annotation_id: 0,
        }
    }

    pub fn number(&self) -> PageNumber {
        self.number
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    /// Flips the bookmark flag and returns the new value
    pub fn toggle_bookmark(&mut self) -> bool {
        self.bookmarked = !self.bookmarked;
        self.bookmarked
    }

    /// Appends an annotation and returns its fresh id
    pub fn add_annotation(&mut self, text: impl Into<String>) -> AnnotationId {
        self.last_annotation_id += 1;
        let id = AnnotationId(self.last_annotation_id);
        self.annotations.insert(id, Annotation::new(text));
        id
    }

    /// Removes an annotation, returning it if the id was in use
    pub fn remove_annotation(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.remove(&id)
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    /// Annotations in id (creation) order
    pub fn annotations(&self) -> impl Iterator<Item = (AnnotationId, &Annotation)> {
        self.annotations.iter().map(|(id, a)| (*id, a))
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn has_annotations(&self) -> bool {
        !self.annotations.is_empty()
    }
}
