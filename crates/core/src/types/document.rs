//! Document domain model
//!
//! A [`Document`] is a shared handle: cloning it is cheap and every clone
//! observes the same pages, bookmarks and annotations. Identity is the
//! absolute file path.

use crate::error::{CoreError, Result};
use crate::events::DocumentEvent;
use crate::subject::{Listener, Subject};
use crate::types::common::today;
use crate::types::{AnnotationId, Page, PageNumber, Validator};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Facts about a file, gathered before the document is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub author: String,
    pub mime_type: String,
    pub last_modified: NaiveDate,
    pub num_pages: Option<u32>,
}

impl DocumentMetadata {
    /// Metadata dated today
    pub fn today(
        author: impl Into<String>,
        mime_type: impl Into<String>,
        num_pages: Option<u32>,
    ) -> Self {
        Self {
            author: author.into(),
            mime_type: mime_type.into(),
            last_modified: today(),
            num_pages,
        }
    }
}

impl Validator for DocumentMetadata {
    fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.num_pages == Some(0) {
            errors.push("Page count must be greater than zero when known".to_string());
        }

        if self.mime_type.chars().any(char::is_whitespace) {
            errors.push(format!("Invalid MIME type: '{}'", self.mime_type));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Partial update applied by `Library::update_document`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl DocumentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

#[derive(Debug)]
struct DocumentState {
    title: String,
    author: String,
    mime_type: String,
    last_modified: NaiveDate,
    num_pages: Option<u32>,
    last_page_visited: Option<PageNumber>,
    pages: BTreeMap<PageNumber, Page>,
}

impl DocumentState {
    fn touch(&mut self) {
        self.last_modified = today();
    }

    fn check_page(&self, page: PageNumber) -> Result<()> {
        if page == 0 {
            return Err(CoreError::invalid_argument(
                "page",
                "page numbers start at 1",
            ));
        }
        if let Some(total) = self.num_pages {
            if page > total {
                return Err(CoreError::invalid_argument(
                    "page",
                    format!("page {} is beyond the last page ({})", page, total),
                ));
            }
        }
        Ok(())
    }

    fn page_mut(&mut self, page: PageNumber) -> &mut Page {
        self.pages.entry(page).or_insert_with(|| Page::new(page))
    }
}

struct DocumentInner {
    path: PathBuf,
    state: RefCell<DocumentState>,
    subject: Subject<DocumentEvent>,
}

/// A document in the library
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl Document {
    /// Creates a document for the file at `path`
    ///
    /// Relative paths are resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the path is empty or the metadata is invalid.
    pub fn new(
        title: impl Into<String>,
        path: impl AsRef<Path>,
        metadata: DocumentMetadata,
    ) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CoreError::invalid_argument("path", "must not be empty"));
        }
        let path = std::path::absolute(path)
            .map_err(|e| CoreError::invalid_argument("path", e.to_string()))?;

        metadata
            .validate()
            .map_err(|errors| CoreError::invalid_argument("metadata", errors.join("; ")))?;

        let state = DocumentState {
            title: title.into(),
            author: metadata.author,
            mime_type: metadata.mime_type,
            last_modified: metadata.last_modified,
            num_pages: metadata.num_pages,
            last_page_visited: None,
            pages: BTreeMap::new(),
        };

        Ok(Self {
            inner: Rc::new(DocumentInner {
                path,
                state: RefCell::new(state),
                subject: Subject::new(),
            }),
        })
    }

    /// Absolute path of the backing file; the document's identity
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn title(&self) -> String {
        self.inner.state.borrow().title.clone()
    }

    pub fn author(&self) -> String {
        self.inner.state.borrow().author.clone()
    }

    pub fn mime_type(&self) -> String {
        self.inner.state.borrow().mime_type.clone()
    }

    pub fn last_modified(&self) -> NaiveDate {
        self.inner.state.borrow().last_modified
    }

    pub fn num_pages(&self) -> Option<u32> {
        self.inner.state.borrow().num_pages
    }

    pub fn last_page_visited(&self) -> Option<PageNumber> {
        self.inner.state.borrow().last_page_visited
    }

    /// Records the reading position. Not a modification.
    pub fn set_last_page_visited(&self, page: PageNumber) -> Result<()> {
        let mut state = self.inner.state.borrow_mut();
        state.check_page(page)?;
        state.last_page_visited = Some(page);
        Ok(())
    }

    /// Renames the document. Emits no event.
    pub fn set_title(&self, title: impl Into<String>) {
        let mut state = self.inner.state.borrow_mut();
        state.title = title.into();
        state.touch();
    }

    /// Changes the author. Emits no event.
    pub fn set_author(&self, author: impl Into<String>) {
        let mut state = self.inner.state.borrow_mut();
        state.author = author.into();
        state.touch();
    }

    /// Flips the bookmark on `page` and returns the new flag
    pub fn toggle_bookmark(&self, page: PageNumber) -> Result<bool> {
        let bookmarked = {
            let mut state = self.inner.state.borrow_mut();
            state.check_page(page)?;
            let bookmarked = state.page_mut(page).toggle_bookmark();
            state.touch();
            bookmarked
        };

        self.emit(DocumentEvent::ToggleBookmark {
            document: self.clone(),
            page,
            bookmarked,
        });
        Ok(bookmarked)
    }

    /// Appends an annotation to `page` and returns its id
    pub fn add_annotation(
        &self,
        page: PageNumber,
        text: impl Into<String>,
    ) -> Result<AnnotationId> {
        let text = text.into();
        let (annotation, page_has_annotations) = {
            let mut state = self.inner.state.borrow_mut();
            state.check_page(page)?;
            let entry = state.page_mut(page);
            let id = entry.add_annotation(text.clone());
            let has = entry.has_annotations();
            state.touch();
            (id, has)
        };

        self.emit(DocumentEvent::AddAnnotation {
            document: self.clone(),
            page,
            annotation,
            text,
            page_has_annotations,
        });
        Ok(annotation)
    }

    /// Removes annotation `id` from `page`
    ///
    /// A page that was never annotated or bookmarked is left alone.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an invalid page number or an id not in
    /// use on an existing page.
    pub fn remove_annotation(&self, page: PageNumber, id: AnnotationId) -> Result<()> {
        let page_has_annotations = {
            let mut state = self.inner.state.borrow_mut();
            state.check_page(page)?;
            let Some(entry) = state.pages.get_mut(&page) else {
                return Ok(());
            };
            if entry.remove_annotation(id).is_none() {
                return Err(CoreError::invalid_argument(
                    "annotation",
                    format!("no annotation {} on page {}", id, page),
                ));
            }
            let has = entry.has_annotations();
            state.touch();
            has
        };

        self.emit(DocumentEvent::RemoveAnnotation {
            document: self.clone(),
            page,
            annotation: id,
            page_has_annotations,
        });
        Ok(())
    }

    /// Bookmarked page numbers, ascending
    pub fn bookmarks(&self) -> Vec<PageNumber> {
        self.inner
            .state
            .borrow()
            .pages
            .values()
            .filter(|p| p.is_bookmarked())
            .map(Page::number)
            .collect()
    }

    /// True if any page is bookmarked
    pub fn is_bookmarked(&self) -> bool {
        self.inner
            .state
            .borrow()
            .pages
            .values()
            .any(Page::is_bookmarked)
    }

    pub fn is_page_bookmarked(&self, page: PageNumber) -> bool {
        self.inner
            .state
            .borrow()
            .pages
            .get(&page)
            .is_some_and(Page::is_bookmarked)
    }

    pub fn number_of_annotations(&self, page: PageNumber) -> usize {
        self.inner
            .state
            .borrow()
            .pages
            .get(&page)
            .map_or(0, Page::annotation_count)
    }

    /// Annotation texts on `page` in creation order
    pub fn annotations(&self, page: PageNumber) -> Vec<String> {
        self.inner
            .state
            .borrow()
            .pages
            .get(&page)
            .map(|p| p.annotations().map(|(_, a)| a.text().to_string()).collect())
            .unwrap_or_default()
    }

    pub fn annotation_text(&self, page: PageNumber, id: AnnotationId) -> Option<String> {
        self.inner
            .state
            .borrow()
            .pages
            .get(&page)
            .and_then(|p| p.annotation(id))
            .map(|a| a.text().to_string())
    }

    pub fn has_annotations(&self, page: PageNumber) -> bool {
        self.inner
            .state
            .borrow()
            .pages
            .get(&page)
            .is_some_and(Page::has_annotations)
    }

    /// Snapshot of a page, if it was ever referenced
    pub fn page(&self, page: PageNumber) -> Option<Page> {
        self.inner.state.borrow().pages.get(&page).cloned()
    }

    /// Tests `regex` against `"{title} {author}"`
    pub fn matches(&self, regex: &Regex) -> bool {
        let state = self.inner.state.borrow();
        regex.is_match(&format!("{} {}", state.title, state.author))
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

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.inner.path == other.inner.path
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.path.hash(state);
    }
}

impl PartialOrd for Document {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Document {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.path.cmp(&other.inner.path)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Document")
            .field("path", &self.inner.path)
            .field("title", &state.title)
            .field("author", &state.author)
            .field("mime_type", &state.mime_type)
            .field("last_modified", &state.last_modified)
            .field("num_pages", &state.num_pages)
            .finish()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        write!(
            f,
            "{} by {} ({}, {})",
            state.title,
            state.author,
            self.inner.path.display(),
            state.last_modified
        )
    }
}
