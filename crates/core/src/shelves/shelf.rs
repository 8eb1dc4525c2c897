//! Shelf domain models
//!
//! A shelf is a named view over part of the library. Normal shelves hold an
//! explicit list; smart shelves derive membership from a predicate and keep
//! a cache of it up to date by listening to the library and its documents.

use crate::error::{CoreError, Result};
use crate::events::DocumentEvent;
use crate::library::Library;
use crate::subject::Listener;
use crate::types::{Document, Validator};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Membership test of a smart shelf
pub type Predicate = Rc<dyn Fn(&Document) -> bool>;

/// Kind of shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelfType {
    /// Manually curated shelf
    Normal,
    /// Predicate-driven shelf that can be removed
    Smart,
    /// Predicate-driven shelf that can never be removed
    UnremovableSmart,
}

impl ShelfType {
    pub fn is_smart(&self) -> bool {
        matches!(self, Self::Smart | Self::UnremovableSmart)
    }

    pub fn is_removable(&self) -> bool {
        !matches!(self, Self::UnremovableSmart)
    }
}

impl std::fmt::Display for ShelfType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Smart => write!(f, "smart"),
            Self::UnremovableSmart => write!(f, "smart (unremovable)"),
        }
    }
}

/// The library a smart shelf filters and the test it applies
#[derive(Clone)]
pub struct SmartCriteria {
    pub library: Library,
    pub predicate: Predicate,
}

impl SmartCriteria {
    pub fn new(library: Library, predicate: Predicate) -> Self {
        Self { library, predicate }
    }

    /// A document qualifies while it is in the library and passes the predicate
    pub fn qualifies(&self, document: &Document) -> bool {
        self.library.contains(document) && (self.predicate)(document)
    }
}

/// A named shelf
pub struct Shelf {
    me: Weak<Shelf>,
    name: String,
    shelf_type: ShelfType,
    documents: RefCell<Vec<Document>>,
    criteria: Option<SmartCriteria>,
}

impl Shelf {
    /// Creates an empty normal shelf
    pub fn normal(name: impl Into<String>) -> Result<Rc<Self>> {
        Self::build(name.into(), ShelfType::Normal, None)
    }

    /// Creates a removable smart shelf over `library`
    ///
    /// The shelf starts with every library document that passes `predicate`
    /// and registers itself on the library and on each of its documents.
    pub fn smart(
        name: impl Into<String>,
        library: Library,
        predicate: Predicate,
    ) -> Result<Rc<Self>> {
        Self::build(
            name.into(),
            ShelfType::Smart,
            Some(SmartCriteria::new(library, predicate)),
        )
    }

    /// Creates a smart shelf that the registry refuses to remove
    pub fn unremovable_smart(
        name: impl Into<String>,
        library: Library,
        predicate: Predicate,
    ) -> Result<Rc<Self>> {
        Self::build(
            name.into(),
            ShelfType::UnremovableSmart,
            Some(SmartCriteria::new(library, predicate)),
        )
    }

    fn build(
        name: String,
        shelf_type: ShelfType,
        criteria: Option<SmartCriteria>,
    ) -> Result<Rc<Self>> {
        let seeded: Vec<Document> = criteria
            .as_ref()
            .map(|c| {
                c.library
                    .documents()
                    .into_iter()
                    .filter(|d| (c.predicate)(d))
                    .collect()
            })
            .unwrap_or_default();

        let shelf = Rc::new_cyclic(|me| Self {
            me: me.clone(),
            name,
            shelf_type,
            documents: RefCell::new(seeded),
            criteria,
        });

        shelf
            .validate()
            .map_err(|errors| CoreError::invalid_argument("shelf", errors.join("; ")))?;

        if let Some(criteria) = &shelf.criteria {
            let listener: Rc<dyn Listener<DocumentEvent>> = shelf.clone();
            criteria.library.register_listener(Rc::clone(&listener));
            for document in criteria.library.documents() {
                document.register_listener(Rc::clone(&listener));
            }
        }

        Ok(shelf)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shelf_type(&self) -> ShelfType {
        self.shelf_type
    }

    pub fn is_smart(&self) -> bool {
        self.shelf_type.is_smart()
    }

    pub fn is_removable(&self) -> bool {
        self.shelf_type.is_removable()
    }

    pub fn criteria(&self) -> Option<&SmartCriteria> {
        self.criteria.as_ref()
    }

    /// Places a document on a normal shelf
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for smart shelves.
    pub fn add_document(&self, document: &Document) -> Result<bool> {
        if self.is_smart() {
            return Err(CoreError::unsupported(
                "add document",
                format!("smart shelf '{}' is read-only", self.name),
            ));
        }

        let mut documents = self.documents.borrow_mut();
        if documents.contains(document) {
            return Ok(false);
        }
        documents.push(document.clone());
        Ok(true)
    }

    /// Takes a document off a normal shelf
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for smart shelves.
    pub fn remove_document(&self, document: &Document) -> Result<bool> {
        if self.is_smart() {
            return Err(CoreError::unsupported(
                "remove document",
                format!("smart shelf '{}' is read-only", self.name),
            ));
        }
        Ok(self.evict(document))
    }

    /// Current members
    ///
    /// For smart shelves this is recomputed from the live library.
    pub fn documents(&self) -> Vec<Document> {
        match &self.criteria {
            Some(criteria) => criteria
                .library
                .documents()
                .into_iter()
                .filter(|d| (criteria.predicate)(d))
                .collect(),
            None => self.documents.borrow().clone(),
        }
    }

    /// Members as last recorded by event processing
    pub fn cached_documents(&self) -> Vec<Document> {
        self.documents.borrow().clone()
    }

    /// Cache membership test
    pub fn contains(&self, document: &Document) -> bool {
        self.documents.borrow().contains(document)
    }

    /// Number of current members, counted like [`Shelf::documents`]
    pub fn len(&self) -> usize {
        match &self.criteria {
            Some(_) => self.documents().len(),
            None => self.documents.borrow().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict(&self, document: &Document) -> bool {
        let mut documents = self.documents.borrow_mut();
        match documents.iter().position(|d| d == document) {
            Some(index) => {
                documents.remove(index);
                true
            }
            None => false,
        }
    }

    fn admit(&self, document: &Document) -> bool {
        let mut documents = self.documents.borrow_mut();
        if documents.contains(document) {
            return false;
        }
        documents.push(document.clone());
        true
    }

    fn as_listener(&self) -> Option<Rc<dyn Listener<DocumentEvent>>> {
        self.me
            .upgrade()
            .map(|shelf| shelf as Rc<dyn Listener<DocumentEvent>>)
    }

    fn reevaluate(&self, criteria: &SmartCriteria, document: &Document) {
        if criteria.qualifies(document) {
            if self.admit(document) {
                log::debug!("Shelf '{}' gained {}", self.name, document.path().display());
            }
        } else if self.evict(document) {
            log::debug!("Shelf '{}' lost {}", self.name, document.path().display());
        }
    }
}

impl Listener<DocumentEvent> for Shelf {
    fn process_event(&self, event: &DocumentEvent) {
        let document = event.document();

        let Some(criteria) = &self.criteria else {
            if let DocumentEvent::RemoveDocument { .. } = event {
                if self.evict(document) {
                    log::debug!("Shelf '{}' evicted {}", self.name, document.path().display());
                }
            }
            return;
        };

        match event {
            DocumentEvent::AddDocument { .. } => {
                if (criteria.predicate)(document) && self.admit(document) {
                    log::debug!("Shelf '{}' gained {}", self.name, document.path().display());
                }
                if let Some(listener) = self.as_listener() {
                    document.register_listener(listener);
                }
            }
            DocumentEvent::RemoveDocument { .. } => {
                self.reevaluate(criteria, document);
                if let Some(listener) = self.as_listener() {
                    document.unregister_listener(&listener);
                }
            }
            DocumentEvent::AddAnnotation { .. }
            | DocumentEvent::RemoveAnnotation { .. }
            | DocumentEvent::ToggleBookmark { .. } => {
                self.reevaluate(criteria, document);
            }
        }
    }
}

impl Validator for Shelf {
    fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Shelf name cannot be empty".to_string());
        }

        if self.shelf_type.is_smart() && self.criteria.is_none() {
            errors.push("Smart shelf must have criteria".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl std::fmt::Debug for Shelf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shelf")
            .field("name", &self.name)
            .field("shelf_type", &self.shelf_type)
            .field("documents", &self.documents.borrow().len())
            .finish()
    }
}
