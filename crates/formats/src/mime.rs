// FILE: src/mime.rs
// ============================================================================

use crate::DocumentFormat;

/// MIME type information for document formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeType {
    primary: &'static str,
    alternatives: Vec<&'static str>,
}

impl MimeType {
    /// Returns the MIME type for a given document format
    pub fn from_format(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Pdf => MimeType {
                primary: "application/pdf",
                alternatives: vec!["application/x-pdf"],
            },
            DocumentFormat::Djvu => MimeType {
                primary: "image/vnd.djvu",
                alternatives: vec!["image/x-djvu"],
            },
            DocumentFormat::Epub => MimeType {
                primary: "application/epub+zip",
                alternatives: vec![],
            },
            DocumentFormat::Mobi => MimeType {
                primary: "application/x-mobipocket-ebook",
                alternatives: vec![],
            },
            DocumentFormat::PlainText => MimeType {
                primary: "text/plain",
                alternatives: vec![],
            },
            DocumentFormat::Markdown => MimeType {
                primary: "text/markdown",
                alternatives: vec!["text/x-markdown"],
            },
            DocumentFormat::Html => MimeType {
                primary: "text/html",
                alternatives: vec!["application/xhtml+xml"],
            },
            DocumentFormat::Rtf => MimeType {
                primary: "application/rtf",
                alternatives: vec!["text/rtf"],
            },
            DocumentFormat::Png => MimeType {
                primary: "image/png",
                alternatives: vec![],
            },
            DocumentFormat::Jpeg => MimeType {
                primary: "image/jpeg",
                alternatives: vec!["image/jpg"],
            },
        }
    }

    /// Finds the format a MIME string names, accepting alternatives
    pub fn to_format(mime: &str) -> Option<DocumentFormat> {
        let mime = mime.trim().to_lowercase();
        DocumentFormat::all()
            .into_iter()
            .find(|format| Self::from_format(*format).matches(&mime))
    }

    /// Returns the primary MIME type
    pub fn primary(&self) -> &'static str {
        self.primary
    }

    /// Returns alternative MIME types
    pub fn alternatives(&self) -> &[&'static str] {
        &self.alternatives
    }

    /// Returns all MIME types (primary + alternatives)
    pub fn all_types(&self) -> Vec<&'static str> {
        let mut types = vec![self.primary];
        types.extend(&self.alternatives);
        types
    }

    /// True if `mime` is the primary type or one of the alternatives
    pub fn matches(&self, mime: &str) -> bool {
        self.primary == mime || self.alternatives.iter().any(|alt| *alt == mime)
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_mime() {
        let mime = MimeType::from_format(DocumentFormat::Pdf);
        assert_eq!(mime.primary(), "application/pdf");
        assert_eq!(mime.all_types(), vec!["application/pdf", "application/x-pdf"]);
    }

    #[test]
    fn test_plain_text_mime() {
        let mime = MimeType::from_format(DocumentFormat::PlainText);
        assert_eq!(mime.to_string(), "text/plain");
        assert!(mime.alternatives().is_empty());
    }

    #[test]
    fn test_to_format() {
        assert_eq!(MimeType::to_format("application/pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(MimeType::to_format(" Image/JPG "), Some(DocumentFormat::Jpeg));
        assert_eq!(MimeType::to_format("audio/mpeg"), None);
    }
}
