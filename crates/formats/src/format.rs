//! Document format types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Document formats the library knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    // === Paged formats ===
    /// PDF - Portable Document Format
    Pdf,
    /// DjVu - scanned documents
    Djvu,

    // === Reflowable e-book formats ===
    /// EPUB - zipped XHTML e-book
    Epub,
    /// MOBI - Mobipocket e-book
    Mobi,

    // === Text formats ===
    /// Plain UTF-8 text
    PlainText,
    /// Markdown
    Markdown,
    /// HTML page
    Html,
    /// Rich Text Format
    Rtf,

    // === Images ===
    /// PNG image (scanned page)
    Png,
    /// JPEG image (scanned page)
    Jpeg,
}

impl DocumentFormat {
    /// Returns all supported formats
    pub fn all() -> Vec<Self> {
        vec![
            Self::Pdf,
            Self::Djvu,
            Self::Epub,
            Self::Mobi,
            Self::PlainText,
            Self::Markdown,
            Self::Html,
            Self::Rtf,
            Self::Png,
            Self::Jpeg,
        ]
    }

    /// Detects format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "djvu" | "djv" => Some(Self::Djvu),
            "epub" => Some(Self::Epub),
            "mobi" | "azw" => Some(Self::Mobi),
            "txt" | "text" => Some(Self::PlainText),
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" | "xhtml" => Some(Self::Html),
            "rtf" => Some(Self::Rtf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Detects format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Djvu => "djvu",
            Self::Epub => "epub",
            Self::Mobi => "mobi",
            Self::PlainText => "txt",
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Rtf => "rtf",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Returns the format name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Djvu => "DjVu",
            Self::Epub => "EPUB",
            Self::Mobi => "Mobipocket",
            Self::PlainText => "Plain text",
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
            Self::Rtf => "Rich Text",
            Self::Png => "PNG image",
            Self::Jpeg => "JPEG image",
        }
    }

    /// True for formats stored as UTF-8 text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::PlainText | Self::Markdown | Self::Html | Self::Rtf
        )
    }

    /// True when the format has a fixed page count worth extracting
    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Pdf | Self::Djvu)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
