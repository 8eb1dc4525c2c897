//! The document collection every shelf observes

use crate::error::{CoreError, Result};
use crate::events::DocumentEvent;
use crate::subject::{Listener, Subject};
use crate::types::{Document, DocumentProperties};
use regex::RegexBuilder;
use std::cell::RefCell;
use std::rc::Rc;

struct LibraryInner {
    documents: RefCell<Vec<Document>>,
    subject: Subject<DocumentEvent>,
}

/// Ordered, duplicate-free collection of documents
///
/// `Library` is a shared handle; clones refer to the same collection.
#[derive(Clone)]
pub struct Library {
    inner: Rc<LibraryInner>,
}

impl Library {
    /// Creates an empty library
    pub fn new() -> Self {
        Self {
            inner: Rc::new(LibraryInner {
                documents: RefCell::new(Vec::new()),
                subject: Subject::new(),
            }),
        }
    }

    /// Adds a document. Returns false if an equal document is already present.
    pub fn add_document(&self, document: Document) -> bool {
        {
            let mut documents = self.inner.documents.borrow_mut();
            if documents.contains(&document) {
                log::debug!("Document already in library: {}", document.path().display());
                return false;
            }
            documents.push(document.clone());
        }

        log::info!("Added document {}", document.path().display());
        self.emit(DocumentEvent::AddDocument { document });
        true
    }

    /// Removes a document. Returns false if it was not present.
    pub fn remove_document(&self, document: &Document) -> bool {
        let removed = {
            let mut documents = self.inner.documents.borrow_mut();
            match documents.iter().position(|d| d == document) {
                Some(index) => documents.remove(index),
                None => return false,
            }
        };

        log::info!("Removed document {}", removed.path().display());
        self.emit(DocumentEvent::RemoveDocument { document: removed });
        true
    }

    /// Applies the present fields of `props` to a document in the library
    ///
    /// Does nothing if the document is not in the library. Emits no event.
    pub fn update_document(&self, document: &Document, props: &DocumentProperties) {
        let Some(stored) = self.find(document) else {
            return;
        };

        if let Some(title) = &props.title {
            stored.set_title(title.as_str());
        }
        if let Some(author) = &props.author {
            stored.set_author(author.as_str());
        }
    }

    /// Documents whose `"{title} {author}"` contains a match for `pattern`
    ///
    /// Matching is case-insensitive. An empty pattern matches everything.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `pattern` is not a valid regular expression.
    pub fn get_matches(&self, pattern: &str) -> Result<Vec<Document>> {
        let regex = RegexBuilder::new(&format!("^.*(?:{}).*$", pattern))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| CoreError::invalid_argument("pattern", e.to_string()))?;

        Ok(self
            .inner
            .documents
            .borrow()
            .iter()
            .filter(|d| d.matches(&regex))
            .cloned()
            .collect())
    }

    /// Snapshot of the documents in insertion order
    pub fn documents(&self) -> Vec<Document> {
        self.inner.documents.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.documents.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.documents.borrow().is_empty()
    }

    pub fn contains(&self, document: &Document) -> bool {
        self.inner.documents.borrow().contains(document)
    }

    /// The stored handle equal to `document`
    pub fn find(&self, document: &Document) -> Option<Document> {
        self.inner
            .documents
            .borrow()
            .iter()
            .find(|d| *d == document)
            .cloned()
    }

    pub fn register_listener(&self, listener: Rc<dyn Listener<DocumentEvent>>) {
        self.inner.subject.register_listener(listener);
    }

    pub fn unregister_listener(&self, listener: &Rc<dyn Listener<DocumentEvent>>) {
        self.inner.subject.unregister_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.subject.listener_count()
    }

    fn emit(&self, event: DocumentEvent) {
        log::debug!(
            "{} -> {} listener(s)",
            event,
            self.inner.subject.listener_count()
        );
        self.inner.subject.emit_event(&event);
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("documents", &self.inner.documents.borrow())
            .field("listeners", &self.inner.subject.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{today, DocumentMetadata};
    use chrono::Duration;

    fn doc(path: &str, title: &str, author: &str) -> Document {
        Document::new(
            title,
            path,
            DocumentMetadata::today(author, "application/pdf", Some(10)),
        )
        .unwrap()
    }

    struct Recorder(RefCell<Vec<DocumentEvent>>);

    impl Listener<DocumentEvent> for Recorder {
        fn process_event(&self, event: &DocumentEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_add_and_remove() {
        let library = Library::new();
        let a = doc("/lib/a.pdf", "A", "x");
        let b = doc("/lib/b.pdf", "B", "y");

        assert!(library.add_document(a.clone()));
        assert!(library.add_document(b.clone()));
        assert_eq!(library.documents(), vec![a.clone(), b.clone()]);

        assert!(library.remove_document(&a));
        assert!(!library.remove_document(&a));
        assert_eq!(library.documents(), vec![b]);
    }

    #[test]
    fn test_duplicate_path_is_rejected() {
        let library = Library::new();
        assert!(library.add_document(doc("/lib/same.pdf", "One", "x")));
        assert!(!library.add_document(doc("/lib/same.pdf", "Two", "y")));
        assert_eq!(library.len(), 1);
        assert_eq!(library.documents()[0].title(), "One");
    }

    #[test]
    fn test_events() {
        let library = Library::new();
        let recorder = Rc::new(Recorder(RefCell::new(Vec::new())));
        library.register_listener(recorder.clone());

        let a = doc("/lib/ev.pdf", "A", "x");
        library.add_document(a.clone());
        library.add_document(a.clone());
        library.remove_document(&a);
        library.remove_document(&a);

        let events = recorder.0.borrow();
        assert_eq!(
            *events,
            vec![
                DocumentEvent::AddDocument { document: a.clone() },
                DocumentEvent::RemoveDocument { document: a },
            ]
        );
    }

    #[test]
    fn test_state_visible_to_listener() {
        struct Checker {
            library: Library,
            seen: RefCell<Vec<bool>>,
        }
        impl Listener<DocumentEvent> for Checker {
            fn process_event(&self, event: &DocumentEvent) {
                self.seen
                    .borrow_mut()
                    .push(self.library.contains(event.document()));
            }
        }

        let library = Library::new();
        let checker = Rc::new(Checker {
            library: library.clone(),
            seen: RefCell::new(Vec::new()),
        });
        library.register_listener(checker.clone());

        let a = doc("/lib/order.pdf", "A", "x");
        library.add_document(a.clone());
        library.remove_document(&a);
        assert_eq!(*checker.seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_update_document() {
        let library = Library::new();
        let mut meta = DocumentMetadata::today("old", "application/pdf", None);
        meta.last_modified = today() - Duration::days(3);
        let a = Document::new("Old", "/lib/upd.pdf", meta).unwrap();
        library.add_document(a.clone());

        library.update_document(&a, &DocumentProperties::new().with_title("New"));
        assert_eq!(a.title(), "New");
        assert_eq!(a.author(), "old");
        assert_eq!(a.last_modified(), today());

        let outsider = doc("/lib/outsider.pdf", "Out", "x");
        library.update_document(&outsider, &DocumentProperties::new().with_title("Changed"));
        assert_eq!(outsider.title(), "Out");
    }

    #[test]
    fn test_get_matches() {
        let library = Library::new();
        library.add_document(doc("/lib/1.pdf", "Rust in Action", "McNamara"));
        library.add_document(doc("/lib/2.pdf", "Programming Rust", "Blandy"));
        library.add_document(doc("/lib/3.pdf", "Dune", "Herbert"));

        assert_eq!(library.get_matches("rust").unwrap().len(), 2);
        assert_eq!(library.get_matches("HERBERT").unwrap().len(), 1);
        assert_eq!(library.get_matches("").unwrap().len(), 3);
        assert_eq!(library.get_matches("Action Mc").unwrap().len(), 1);
        assert!(library.get_matches("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_get_matches_invalid_pattern() {
        let library = Library::new();
        let err = library.get_matches("(unclosed");
        assert!(matches!(err, Err(CoreError::InvalidArgument { .. })));
    }

    #[test]
    fn test_find_returns_stored_handle() {
        let library = Library::new();
        let stored = doc("/lib/find.pdf", "Stored", "x");
        library.add_document(stored.clone());

        let probe = doc("/lib/find.pdf", "Probe", "y");
        let found = library.find(&probe).unwrap();
        assert_eq!(found.title(), "Stored");
        assert!(library.find(&doc("/lib/none.pdf", "", "")).is_none());
    }
}
