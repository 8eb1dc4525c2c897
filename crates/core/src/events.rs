//! Events emitted by documents, the library and the shelves registry
//!
//! Events are immutable descriptions of a single state change. They carry
//! enough payload for a listener to react without querying the emitter.

use crate::types::{AnnotationId, Document, PageNumber};
use std::fmt;

/// Events about documents: collection membership and per-document edits
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// A document entered the library
    AddDocument { document: Document },

    /// A document left the library
    RemoveDocument { document: Document },

    /// An annotation was appended to a page
    AddAnnotation {
        document: Document,
        page: PageNumber,
        annotation: AnnotationId,
        text: String,
        page_has_annotations: bool,
    },

    /// An annotation was removed from a page
    RemoveAnnotation {
        document: Document,
        page: PageNumber,
        annotation: AnnotationId,
        page_has_annotations: bool,
    },

    /// A page's bookmark flag was flipped
    ToggleBookmark {
        document: Document,
        page: PageNumber,
        bookmarked: bool,
    },
}

impl DocumentEvent {
    /// The document this event is about
    pub fn document(&self) -> &Document {
        match self {
            Self::AddDocument { document }
            | Self::RemoveDocument { document }
            | Self::AddAnnotation { document, .. }
            | Self::RemoveAnnotation { document, .. }
            | Self::ToggleBookmark { document, .. } => document,
        }
    }

    /// Short name of the event kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddDocument { .. } => "AddDocument",
            Self::RemoveDocument { .. } => "RemoveDocument",
            Self::AddAnnotation { .. } => "AddAnnotation",
            Self::RemoveAnnotation { .. } => "RemoveAnnotation",
            Self::ToggleBookmark { .. } => "ToggleBookmark",
        }
    }
}

impl fmt::Display for DocumentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddAnnotation {
                page, annotation, ..
            }
            | Self::RemoveAnnotation {
                page, annotation, ..
            } => write!(
                f,
                "{} [{} page={} annotation={}]",
                self.kind(),
                self.document().path().display(),
                page,
                annotation
            ),
            Self::ToggleBookmark {
                page, bookmarked, ..
            } => write!(
                f,
                "{} [{} page={} bookmarked={}]",
                self.kind(),
                self.document().path().display(),
                page,
                bookmarked
            ),
            Self::AddDocument { .. } | Self::RemoveDocument { .. } => write!(
                f,
                "{} [{}]",
                self.kind(),
                self.document().path().display()
            ),
        }
    }
}

/// Events about the shelves registry
#[derive(Debug, Clone, PartialEq)]
pub enum ShelfEvent {
    /// A shelf was created
    AddShelf { name: String },

    /// A shelf was removed
    RemoveShelf { name: String },

    /// A document was placed on a shelf
    AddDocumentToShelf { shelf: String, document: Document },

    /// A document was taken off a shelf
    RemoveDocumentFromShelf { shelf: String, document: Document },
}

impl ShelfEvent {
    /// Name of the shelf this event is about
    pub fn shelf_name(&self) -> &str {
        match self {
            Self::AddShelf { name } | Self::RemoveShelf { name } => name,
            Self::AddDocumentToShelf { shelf, .. }
            | Self::RemoveDocumentFromShelf { shelf, .. } => shelf,
        }
    }

    /// The document involved, for per-document events
    pub fn document(&self) -> Option<&Document> {
        match self {
            Self::AddDocumentToShelf { document, .. }
            | Self::RemoveDocumentFromShelf { document, .. } => Some(document),
            Self::AddShelf { .. } | Self::RemoveShelf { .. } => None,
        }
    }
}

impl fmt::Display for ShelfEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddShelf { name } => write!(f, "AddShelf [shelfName={}]", name),
            Self::RemoveShelf { name } => write!(f, "RemoveShelf [shelfName={}]", name),
            Self::AddDocumentToShelf { shelf, document } => write!(
                f,
                "AddDocumentToShelf [shelfName={} document={}]",
                shelf,
                document.path().display()
            ),
            Self::RemoveDocumentFromShelf { shelf, document } => write!(
                f,
                "RemoveDocumentFromShelf [shelfName={} document={}]",
                shelf,
                document.path().display()
            ),
        }
    }
}

/// The single stream of events a user interface observes
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryEvent {
    Document(DocumentEvent),
    Shelf(ShelfEvent),
}

impl From<DocumentEvent> for LibraryEvent {
    fn from(event: DocumentEvent) -> Self {
        Self::Document(event)
    }
}

impl From<ShelfEvent> for LibraryEvent {
    fn from(event: ShelfEvent) -> Self {
        Self::Shelf(event)
    }
}

impl fmt::Display for LibraryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(e) => e.fmt(f),
            Self::Shelf(e) => e.fmt(f),
        }
    }
}
