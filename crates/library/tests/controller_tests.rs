// FILE: crates/library/tests/controller_tests.rs
//! End-to-end tests: files on disk through the controllers to the shelves

use leibooks_core::{
    DocumentProperties, Library, LibraryEvent, Listener, Shelves, BOOKMARKED_SHELF, RECENT_SHELF,
};
use leibooks_library::{DocumentImporter, LibraryController, LibraryError, ShelvesController};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

mod common;

type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Default)]
struct EventLog {
    events: RefCell<Vec<String>>,
}

impl Listener<LibraryEvent> for EventLog {
    fn process_event(&self, event: &LibraryEvent) {
        self.events.borrow_mut().push(event.to_string());
    }
}

struct Fixture {
    dir: TempDir,
    library: Rc<LibraryController>,
    shelves: Rc<ShelvesController>,
}

impl Fixture {
    fn new() -> Result<Self> {
        let _ = env_logger::builder().is_test(true).try_init();

        let library = Library::new();
        let shelves = ShelvesController::new(Shelves::new(library.clone())?);
        let controller = LibraryController::new(library, DocumentImporter::new());
        Ok(Self {
            dir: TempDir::new()?,
            library: controller,
            shelves,
        })
    }

    fn file(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    fn titles(&self, shelf: &str) -> Vec<String> {
        self.shelves
            .documents(shelf)
            .unwrap_or_default()
            .iter()
            .map(|d| d.title())
            .collect()
    }
}

#[test]
fn test_import_fills_recent_shelf() -> Result<()> {
    let fx = Fixture::new()?;
    let path = fx.file("paper.pdf", &common::simple_pdf(3, "Grace Hopper"))?;

    let document = fx.library.import_document("Paper", &path).expect("imported");
    assert_eq!(document.num_pages(), Some(3));
    assert_eq!(document.author(), "Grace Hopper");
    assert_eq!(fx.library.documents().len(), 1);
    assert_eq!(fx.titles(RECENT_SHELF), vec!["Paper"]);
    assert!(fx.titles(BOOKMARKED_SHELF).is_empty());
    Ok(())
}

#[test]
fn test_import_emits_single_event_after_insertion() -> Result<()> {
    let fx = Fixture::new()?;
    let log = Rc::new(EventLog::default());
    fx.library.register_listener(log.clone());

    let path = fx.file("notes.txt", b"notes")?;
    fx.library.import_document("Notes", &path).expect("imported");

    let events = log.events.borrow();
    assert_eq!(events.len(), 1);
    assert!(events[0].starts_with("AddDocument"));
    Ok(())
}

#[test]
fn test_reimport_returns_existing() -> Result<()> {
    let fx = Fixture::new()?;
    let path = fx.file("notes.txt", b"notes")?;

    let first = fx.library.import_document("Notes", &path).expect("first");
    first.toggle_bookmark(1).map_err(LibraryError::from)?;

    let second = fx.library.import_document("Other title", &path).expect("second");
    assert_eq!(fx.library.documents().len(), 1);
    assert_eq!(second.title(), "Notes");
    assert!(second.is_bookmarked());
    Ok(())
}

#[test]
fn test_missing_file_is_none() -> Result<()> {
    let fx = Fixture::new()?;
    let log = Rc::new(EventLog::default());
    fx.library.register_listener(log.clone());

    assert!(fx
        .library
        .import_document("Ghost", fx.dir.path().join("ghost.pdf"))
        .is_none());
    assert!(fx.library.documents().is_empty());
    assert!(log.events.borrow().is_empty());
    Ok(())
}

#[test]
fn test_bookmark_and_remove_lifecycle() -> Result<()> {
    let fx = Fixture::new()?;
    let path = fx.file("paper.pdf", &common::simple_pdf(3, "Grace Hopper"))?;
    let document = fx.library.import_document("Paper", &path).expect("imported");

    assert!(fx.shelves.add_normal_shelf("To read"));
    assert!(fx.shelves.add_document("To read", &document).map_err(LibraryError::from)?);

    document.toggle_bookmark(2).map_err(LibraryError::from)?;
    assert_eq!(fx.titles(BOOKMARKED_SHELF), vec!["Paper"]);

    assert!(fx.library.remove_document(&document));
    assert!(fx.titles(RECENT_SHELF).is_empty());
    assert!(fx.titles(BOOKMARKED_SHELF).is_empty());
    assert!(fx.titles("To read").is_empty());
    Ok(())
}

#[test]
fn test_smart_shelf_over_imports() -> Result<()> {
    let fx = Fixture::new()?;
    assert!(fx
        .shelves
        .add_smart_shelf("X", |d| d.title().contains("Test")));

    let text = fx.file("Test.txt", b"test body")?;
    let document = fx.library.import_document("Test", &text).expect("imported");
    assert_eq!(fx.titles("X"), vec!["Test"]);
    assert_eq!(fx.titles(RECENT_SHELF), vec!["Test"]);

    // Title predicates see renames immediately on iteration
    fx.library
        .update_document(&document, &DocumentProperties::new().with_title("Renamed"));
    assert!(fx.titles("X").is_empty());
    Ok(())
}

#[test]
fn test_smart_shelf_ignores_other_types() -> Result<()> {
    let fx = Fixture::new()?;
    assert!(fx.shelves.add_smart_shelf("Everything", |_| true));

    let html = fx.file("page.html", b"<html><body>hi</body></html>")?;
    let txt = fx.file("plain.txt", b"hi")?;
    fx.library.import_document("Page", &html).expect("html");
    fx.library.import_document("Plain", &txt).expect("txt");

    assert_eq!(fx.titles("Everything"), vec!["Plain"]);
    Ok(())
}

#[test]
fn test_search_through_controller() -> Result<()> {
    let fx = Fixture::new()?;
    fx.library
        .import_document("Rust in Action", fx.file("a.txt", b"a")?)
        .expect("a");
    fx.library
        .import_document("Gardening", fx.file("b.txt", b"b")?)
        .expect("b");

    let matches = fx.library.get_matches("RUST");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title(), "Rust in Action");
    assert!(fx.library.get_matches("[").is_empty());
    assert_eq!(fx.library.get_matches("").len(), 2);
    Ok(())
}

#[test]
fn test_both_controllers_feed_one_listener() -> Result<()> {
    let fx = Fixture::new()?;
    let log = Rc::new(EventLog::default());
    fx.library.register_listener(log.clone());
    fx.shelves.register_listener(log.clone());

    let document = fx
        .library
        .import_document("Notes", fx.file("notes.txt", b"notes")?)
        .expect("imported");
    fx.shelves.add_normal_shelf("Work");
    fx.shelves.add_document("Work", &document).map_err(LibraryError::from)?;
    fx.shelves.remove_document("Work", &document).map_err(LibraryError::from)?;
    document.add_annotation(1, "todo").map_err(LibraryError::from)?;

    let events = log.events.borrow();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| e.split_whitespace().next().unwrap_or(""))
        .collect();
    assert_eq!(
        kinds,
        vec!["AddDocument", "AddShelf", "RemoveDocumentFromShelf", "AddAnnotation"]
    );
    Ok(())
}
