// FILE: crates/library/src/controller/library_controller.rs

use crate::import::DocumentImporter;
use leibooks_core::{
    Document, DocumentEvent, DocumentProperties, Library, LibraryEvent, Listener, Subject,
};
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};

/// Entry point for document operations
///
/// Registered on the library and on every document in it, so listeners see
/// membership changes as well as annotation and bookmark edits.
pub struct LibraryController {
    me: Weak<LibraryController>,
    library: Library,
    importer: DocumentImporter,
    subject: Subject<LibraryEvent>,
}

impl LibraryController {
    pub fn new(library: Library, importer: DocumentImporter) -> Rc<Self> {
        let controller = Rc::new_cyclic(|me| Self {
            me: me.clone(),
            library,
            importer,
            subject: Subject::new(),
        });

        let listener: Rc<dyn Listener<DocumentEvent>> = controller.clone();
        controller.library.register_listener(Rc::clone(&listener));
        for document in controller.library.documents() {
            document.register_listener(Rc::clone(&listener));
        }

        controller
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn documents(&self) -> Vec<Document> {
        self.library.documents()
    }

    /// Imports the file at `path` into the library
    ///
    /// Returns `None` when the title or path is blank or the file cannot be
    /// imported; the reason is logged. Importing a file that is already in
    /// the library returns the stored document.
    pub fn import_document(&self, title: &str, path: impl AsRef<Path>) -> Option<Document> {
        let path = path.as_ref();
        if title.trim().is_empty() || path.as_os_str().is_empty() {
            log::warn!("Import skipped: title and path are required");
            return None;
        }

        let document = match self.importer.import(title, path) {
            Ok(document) => document,
            Err(e) => {
                log::warn!(
                    "File {} not found or could not be open: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        if let Some(existing) = self.library.find(&document) {
            log::info!("{} is already in the library", path.display());
            return Some(existing);
        }

        self.library.add_document(document.clone());
        Some(document)
    }

    pub fn remove_document(&self, document: &Document) -> bool {
        self.library.remove_document(document)
    }

    /// Renames or re-attributes a document; no event is emitted
    pub fn update_document(&self, document: &Document, props: &DocumentProperties) {
        self.library.update_document(document, props);
    }

    /// Case-insensitive search over title and author
    ///
    /// An invalid pattern is logged and matches nothing.
    pub fn get_matches(&self, pattern: &str) -> Vec<Document> {
        self.library.get_matches(pattern).unwrap_or_else(|e| {
            log::warn!("Search for '{}' failed: {}", pattern, e);
            Vec::new()
        })
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

    fn as_listener(&self) -> Option<Rc<dyn Listener<DocumentEvent>>> {
        self.me
            .upgrade()
            .map(|me| me as Rc<dyn Listener<DocumentEvent>>)
    }
}

impl Listener<DocumentEvent> for LibraryController {
    fn process_event(&self, event: &DocumentEvent) {
        if let Some(me) = self.as_listener() {
            match event {
                DocumentEvent::AddDocument { document } => document.register_listener(me),
                DocumentEvent::RemoveDocument { document } => document.unregister_listener(&me),
                _ => {}
            }
        }

        log::debug!("Relaying {}", event);
        self.subject
            .emit_event(&LibraryEvent::Document(event.clone()));
    }
}

impl fmt::Display for LibraryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Library = ")?;
        for document in self.library.documents() {
            writeln!(f, "{}", document)?;
        }
        Ok(())
    }
}

impl fmt::Debug for LibraryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryController")
            .field("library", &self.library)
            .field("listeners", &self.subject.listener_count())
            .finish()
    }
}
