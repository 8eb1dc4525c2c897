// FILE: crates/library/src/controller/shelves_controller.rs

use leibooks_core::{Document, LibraryEvent, Listener, Result, ShelfEvent, Shelves, Subject};
use std::fmt;
use std::rc::Rc;

/// Entry point for shelf operations
pub struct ShelvesController {
    shelves: Shelves,
    subject: Subject<LibraryEvent>,
}

impl ShelvesController {
    pub fn new(shelves: Shelves) -> Rc<Self> {
        let controller = Rc::new(Self {
            shelves,
            subject: Subject::new(),
        });
        controller.shelves.register_listener(controller.clone());
        controller
    }

    pub fn registry(&self) -> &Shelves {
        &self.shelves
    }

    /// Returns false for a blank or taken name
    pub fn add_normal_shelf(&self, name: &str) -> bool {
        self.shelves.add_normal_shelf(name).unwrap_or_else(|e| {
            log::warn!("Cannot add shelf '{}': {}", name, e);
            false
        })
    }

    /// Adds a shelf listing the PDF and plain-text documents accepted by `predicate`
    pub fn add_smart_shelf<F>(&self, name: &str, predicate: F) -> bool
    where
        F: Fn(&Document) -> bool + 'static,
    {
        self.shelves
            .add_smart_shelf(name, Rc::new(predicate))
            .unwrap_or_else(|e| {
                log::warn!("Cannot add smart shelf '{}': {}", name, e);
                false
            })
    }

    /// Shelf names in creation order
    pub fn shelves(&self) -> Vec<String> {
        self.shelves.names()
    }

    /// # Errors
    ///
    /// `UnsupportedOperation` for a shelf that cannot be removed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        self.shelves.remove_shelf(name)
    }

    /// # Errors
    ///
    /// `UnsupportedOperation` for a smart shelf.
    pub fn add_document(&self, shelf_name: &str, document: &Document) -> Result<bool> {
        self.shelves.add_document(shelf_name, document)
    }

    /// # Errors
    ///
    /// `UnsupportedOperation` for a smart shelf.
    pub fn remove_document(&self, shelf_name: &str, document: &Document) -> Result<bool> {
        self.shelves.remove_document(shelf_name, document)
    }

    /// `None` when no shelf has that name
    pub fn documents(&self, shelf_name: &str) -> Option<Vec<Document>> {
        self.shelves.documents(shelf_name)
    }

    pub fn register_listener(&self, listener: Rc<dyn Listener<LibraryEvent>>) {
        self.subject.register_listener(listener);
    }

    pub fn unregister_listener(&self, listener: &Rc<dyn Listener<LibraryEvent>>) {
        self.subject.unregister_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.subject.listener_count()
    }
}

impl Listener<ShelfEvent> for ShelvesController {
    fn process_event(&self, event: &ShelfEvent) {
        log::debug!("Relaying {}", event);
        self.subject.emit_event(&LibraryEvent::Shelf(event.clone()));
    }
}

impl fmt::Display for ShelvesController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shelves=")?;
        for shelf in self.shelves.shelves() {
            let paths: Vec<String> = shelf
                .documents()
                .iter()
                .map(|d| d.path().display().to_string())
                .collect();
            writeln!(f, "{} = [{}]", shelf.name(), paths.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ShelvesController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShelvesController")
            .field("shelves", &self.shelves.names())
            .field("listeners", &self.subject.listener_count())
            .finish()
    }
}
