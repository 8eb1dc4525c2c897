//! Registry of named shelves
//!
//! `Shelves` creates and removes shelves and wires each one to the library
//! and its documents so that membership stays current without polling.

use crate::error::{CoreError, Result};
use crate::events::{DocumentEvent, ShelfEvent};
use crate::library::Library;
use crate::shelves::shelf::{Predicate, Shelf};
use crate::subject::{Listener, Subject};
use crate::types::{today, Document};
use std::cell::RefCell;
use std::rc::Rc;

/// Name of the built-in shelf of documents modified today
pub const RECENT_SHELF: &str = "Recent";

/// Name of the built-in shelf of documents with at least one bookmark
pub const BOOKMARKED_SHELF: &str = "Bookmarked";

/// MIME types smart shelves created through [`Shelves::add_smart_shelf`] accept
pub const SMART_SHELF_MIME_TYPES: [&str; 2] = ["application/pdf", "text/plain"];

fn has_readable_mime(document: &Document) -> bool {
    let mime = document.mime_type();
    SMART_SHELF_MIME_TYPES.contains(&mime.as_str())
}

fn recent() -> Predicate {
    Rc::new(|d: &Document| has_readable_mime(d) && d.last_modified() == today())
}

fn bookmarked() -> Predicate {
    Rc::new(|d: &Document| d.is_bookmarked())
}

/// Insertion-ordered collection of uniquely named shelves
pub struct Shelves {
    library: Library,
    shelves: RefCell<Vec<Rc<Shelf>>>,
    subject: Subject<ShelfEvent>,
}

impl Shelves {
    /// Creates the registry with the built-in "Recent" and "Bookmarked" shelves
    pub fn new(library: Library) -> Result<Self> {
        let shelves = Self {
            library,
            shelves: RefCell::new(Vec::new()),
            subject: Subject::new(),
        };

        shelves.add_unremovable_smart_shelf(RECENT_SHELF, recent())?;
        shelves.add_unremovable_smart_shelf(BOOKMARKED_SHELF, bookmarked())?;

        for shelf in shelves.shelves() {
            shelves.attach(&shelf);
        }

        Ok(shelves)
    }

    /// The library the shelves observe
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Adds an empty normal shelf
    ///
    /// Returns `Ok(false)` if a shelf with that name already exists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank name.
    pub fn add_normal_shelf(&self, name: &str) -> Result<bool> {
        if !self.accepts_name(name)? {
            return Ok(false);
        }
        let shelf = Shelf::normal(name)?;
        self.insert(shelf);
        Ok(true)
    }

    /// Adds a removable smart shelf
    ///
    /// Only PDF and plain-text documents that pass `predicate` are members.
    pub fn add_smart_shelf(&self, name: &str, predicate: Predicate) -> Result<bool> {
        if !self.accepts_name(name)? {
            return Ok(false);
        }
        let filtered: Predicate = Rc::new(move |d: &Document| has_readable_mime(d) && predicate(d));
        let shelf = Shelf::smart(name, self.library.clone(), filtered)?;
        self.insert(shelf);
        Ok(true)
    }

    /// Adds a smart shelf that cannot be removed; `predicate` is used as given
    pub fn add_unremovable_smart_shelf(&self, name: &str, predicate: Predicate) -> Result<bool> {
        if !self.accepts_name(name)? {
            return Ok(false);
        }
        let shelf = Shelf::unremovable_smart(name, self.library.clone(), predicate)?;
        self.insert(shelf);
        Ok(true)
    }

    /// Removes a shelf by name
    ///
    /// Returns `Ok(false)` if no shelf has that name.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` if the shelf is unremovable; it stays.
    pub fn remove_shelf(&self, name: &str) -> Result<bool> {
        let Some(shelf) = self.shelf(name) else {
            return Ok(false);
        };

        if !shelf.is_removable() {
            return Err(CoreError::unsupported(
                "remove shelf",
                "This shelf cannot be removed.",
            ));
        }

        self.shelves
            .borrow_mut()
            .retain(|s| !Rc::ptr_eq(s, &shelf));
        self.detach(&shelf);

        log::info!("Removed shelf '{}'", name);
        self.emit(ShelfEvent::RemoveShelf {
            name: name.to_string(),
        });
        Ok(true)
    }

    /// Puts a document on a named shelf
    ///
    /// Returns `Ok(false)` if the shelf is unknown or already holds the document.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for smart shelves.
    pub fn add_document(&self, shelf_name: &str, document: &Document) -> Result<bool> {
        match self.shelf(shelf_name) {
            Some(shelf) => shelf.add_document(document),
            None => Ok(false),
        }
    }

    /// Takes a document off a named shelf
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for smart shelves.
    pub fn remove_document(&self, shelf_name: &str, document: &Document) -> Result<bool> {
        let Some(shelf) = self.shelf(shelf_name) else {
            return Ok(false);
        };

        let removed = shelf.remove_document(document)?;
        if removed {
            self.emit(ShelfEvent::RemoveDocumentFromShelf {
                shelf: shelf_name.to_string(),
                document: document.clone(),
            });
        }
        Ok(removed)
    }

    /// Members of a named shelf, or `None` if the shelf is unknown
    pub fn documents(&self, shelf_name: &str) -> Option<Vec<Document>> {
        self.shelf(shelf_name).map(|shelf| shelf.documents())
    }

    pub fn shelf(&self, name: &str) -> Option<Rc<Shelf>> {
        self.shelves
            .borrow()
            .iter()
            .find(|s| s.name() == name)
            .cloned()
    }

    /// Shelf names in creation order
    pub fn names(&self) -> Vec<String> {
        self.shelves
            .borrow()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    pub fn shelves(&self) -> Vec<Rc<Shelf>> {
        self.shelves.borrow().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shelves.borrow().iter().any(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.shelves.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.borrow().is_empty()
    }

    pub fn register_listener(&self, listener: Rc<dyn Listener<ShelfEvent>>) {
        self.subject.register_listener(listener);
    }

    pub fn unregister_listener(&self, listener: &Rc<dyn Listener<ShelfEvent>>) {
        self.subject.unregister_listener(listener);
    }

    fn accepts_name(&self, name: &str) -> Result<bool> {
        if name.trim().is_empty() {
            return Err(CoreError::invalid_argument(
                "shelf name",
                "must not be blank",
            ));
        }
        if self.contains(name) {
            log::debug!("Shelf '{}' already exists", name);
            return Ok(false);
        }
        Ok(true)
    }

    fn insert(&self, shelf: Rc<Shelf>) {
        let name = shelf.name().to_string();
        self.shelves.borrow_mut().push(Rc::clone(&shelf));

        log::info!("Added {} shelf '{}'", shelf.shelf_type(), name);
        self.emit(ShelfEvent::AddShelf { name });
        self.attach(&shelf);
    }

    fn attach(&self, shelf: &Rc<Shelf>) {
        let listener: Rc<dyn Listener<DocumentEvent>> = shelf.clone();
        for document in self.library.documents() {
            document.register_listener(Rc::clone(&listener));
        }
        self.library.register_listener(listener);
    }

    fn detach(&self, shelf: &Rc<Shelf>) {
        let listener: Rc<dyn Listener<DocumentEvent>> = shelf.clone();
        self.library.unregister_listener(&listener);
        for document in self.library.documents() {
            document.unregister_listener(&listener);
        }
    }

    fn emit(&self, event: ShelfEvent) {
        log::debug!("{} -> {} listener(s)", event, self.subject.listener_count());
        self.subject.emit_event(&event);
    }
}

impl std::fmt::Debug for Shelves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shelves")
            .field("shelves", &self.names())
            .field("listeners", &self.subject.listener_count())
            .finish()
    }
}
