// FILE: crates/library/src/metadata.rs

use crate::error::{LibraryError, LibraryResult};
use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Local, NaiveDate};
use leibooks_config::LibraryConfig;
use leibooks_core::today;
use leibooks_formats::{DocumentFormat, FormatDetector, MimeType};
use lopdf::Document;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

/// Facts read from a file before it becomes a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub authors: String,
    /// Empty when the type cannot be determined
    pub mime_type: String,
    /// Filesystem modification date
    pub last_modified: NaiveDate,
    pub num_pages: Option<u32>,
}

/// Reads metadata for one family of files
pub trait MetadataReader {
    fn read(&self, path: &Path) -> LibraryResult<ExtractedMetadata>;

    fn name(&self) -> &'static str;
}

/// Facts every file has: type, modification date, a single page
pub struct GenericMetadataReader {
    detector: FormatDetector,
    config: LibraryConfig,
}

impl GenericMetadataReader {
    pub fn new() -> Self {
        Self::with_config(&LibraryConfig::default())
    }

    pub fn with_config(config: &LibraryConfig) -> Self {
        Self {
            detector: FormatDetector::new(),
            config: config.clone(),
        }
    }

    /// Configured override for the extension, else content detection
    pub fn mime_type(&self, path: &Path) -> String {
        match self.config.mime_override(path) {
            Some(mime) => mime.to_string(),
            None => self.detector.detect_mime_type(path),
        }
    }

    pub fn default_author(&self) -> &str {
        &self.config.default_author
    }
}

impl Default for GenericMetadataReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataReader for GenericMetadataReader {
    fn read(&self, path: &Path) -> LibraryResult<ExtractedMetadata> {
        let file_metadata = check_access(path)?;

        let last_modified = file_metadata
            .modified()
            .map(|time| DateTime::<Local>::from(time).date_naive())
            .unwrap_or_else(|e| {
                log::debug!("No modification time for {}: {}", path.display(), e);
                today()
            });

        Ok(ExtractedMetadata {
            authors: self.config.default_author.clone(),
            mime_type: self.mime_type(path),
            last_modified,
            num_pages: Some(1),
        })
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

/// Verifies `path` names a regular file this process can open
pub fn check_access(path: &Path) -> LibraryResult<fs::Metadata> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LibraryError::FileNotFound(path.to_path_buf()),
        _ => LibraryError::unreadable(path, e.to_string()),
    })?;

    if !metadata.is_file() {
        return Err(LibraryError::unreadable(path, "not a regular file"));
    }

    File::open(path).map_err(|e| LibraryError::unreadable(path, e.to_string()))?;
    Ok(metadata)
}

/// Page count and author of a PDF
///
/// Starts from the generic facts. Parsing problems are logged and leave
/// `num_pages` unset and the author at its default; only an unreachable
/// file is an error.
pub struct PdfMetadataReader {
    generic: GenericMetadataReader,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct PdfInfo {
    pages: Option<u32>,
    author: Option<String>,
}

impl PdfMetadataReader {
    pub fn new() -> Self {
        Self::with_config(&LibraryConfig::default())
    }

    pub fn with_config(config: &LibraryConfig) -> Self {
        Self {
            generic: GenericMetadataReader::with_config(config),
        }
    }

    fn inspect(data: &[u8]) -> anyhow::Result<PdfInfo> {
        if !data.starts_with(b"%PDF-") {
            bail!("missing %PDF- header");
        }

        let document =
            Document::load_mem(data).map_err(|e| anyhow!("Failed to parse PDF: {}", e))?;

        let author = info_author(&document);
        let pages = match document.get_pages().len() {
            0 => count_extracted_pages(data).context("Failed to count PDF pages")?,
            n => u32::try_from(n).context("Page count out of range")?,
        };

        Ok(PdfInfo {
            pages: Some(pages),
            author,
        })
    }
}

impl Default for PdfMetadataReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataReader for PdfMetadataReader {
    fn read(&self, path: &Path) -> LibraryResult<ExtractedMetadata> {
        let mut metadata = self.generic.read(path)?;
        metadata.num_pages = None;

        let data = fs::read(path)?;
        match Self::inspect(&data) {
            Ok(info) => {
                metadata.num_pages = info.pages;
                if let Some(author) = info.author {
                    metadata.authors = author;
                }
            }
            Err(e) => log::warn!("Could not read PDF metadata of {}: {:#}", path.display(), e),
        }

        Ok(metadata)
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

/// Falls back to full text extraction, one form feed per page
fn count_extracted_pages(data: &[u8]) -> anyhow::Result<u32> {
    // pdf-extract panics on some malformed files
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data))
        .map_err(|_| anyhow!("PDF parser aborted"))?
        .map_err(|e| anyhow!("Failed to extract PDF text: {}", e))?;

    if text.trim().is_empty() {
        bail!("no pages found");
    }

    Ok((text.matches('\x0C').count() as u32).max(1))
}

/// `/Author` of the information dictionary named by the latest trailer
fn info_author(document: &Document) -> Option<String> {
    let info = document.trailer.get(b"Info").ok()?;
    let (_, info) = document.dereference(info).ok()?;
    let author = info.as_dict().ok()?.get(b"Author").ok()?;
    let (_, author) = document.dereference(author).ok()?;

    let author = lopdf::decode_text_string(author).ok()?;
    let author = author.trim();
    (!author.is_empty()).then(|| author.to_string())
}

/// Readers keyed by MIME type, with the generic reader as fallback
pub struct MetadataReaders {
    readers: HashMap<String, Box<dyn MetadataReader>>,
    fallback: GenericMetadataReader,
}

impl MetadataReaders {
    pub fn new() -> Self {
        Self::with_config(&LibraryConfig::default())
    }

    pub fn with_config(config: &LibraryConfig) -> Self {
        let mut readers = Self {
            readers: HashMap::new(),
            fallback: GenericMetadataReader::with_config(config),
        };
        readers.register(
            MimeType::from_format(DocumentFormat::Pdf).primary(),
            Box::new(PdfMetadataReader::with_config(config)),
        );
        readers
    }

    /// Replaces any reader already registered for `mime_type`
    pub fn register(&mut self, mime_type: impl Into<String>, reader: Box<dyn MetadataReader>) {
        self.readers.insert(mime_type.into(), reader);
    }

    pub fn reader_for(&self, mime_type: &str) -> &dyn MetadataReader {
        match self.readers.get(mime_type) {
            Some(reader) => reader.as_ref(),
            None => &self.fallback,
        }
    }

    /// Generic facts only, skipping content parsing
    pub fn generic(&self) -> &GenericMetadataReader {
        &self.fallback
    }

    /// Detects the file's type and reads it with the matching reader
    pub fn read(&self, path: &Path) -> LibraryResult<ExtractedMetadata> {
        check_access(path)?;
        let mime_type = self.fallback.mime_type(path);
        let reader = self.reader_for(&mime_type);
        log::debug!(
            "Reading {} as '{}' with the {} reader",
            path.display(),
            mime_type,
            reader.name()
        );
        reader.read(path)
    }

    pub fn supported_mime_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.readers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for MetadataReaders {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_rejects_non_pdf() {
        assert!(PdfMetadataReader::inspect(b"hello").is_err());
    }

    #[test]
    fn test_inspect_rejects_truncated_pdf() {
        let err = PdfMetadataReader::inspect(b"%PDF-1.4\n1 0 obj << /Type").unwrap_err();
        assert!(err.to_string().contains("Failed to parse PDF"));
    }

    #[test]
    fn test_registry_fallback() {
        let readers = MetadataReaders::new();
        assert_eq!(readers.reader_for("application/pdf").name(), "pdf");
        assert_eq!(readers.reader_for("text/plain").name(), "generic");
        assert_eq!(readers.reader_for("").name(), "generic");
        assert_eq!(readers.supported_mime_types(), vec!["application/pdf"]);
    }
}
