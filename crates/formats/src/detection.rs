// FILE: src/detection.rs
// ============================================================================

use crate::{DocumentFormat, FormatError, FormatResult, MimeType};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const SNIFF_LEN: usize = 512;

/// Format detector using file content analysis
pub struct FormatDetector;

impl FormatDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detects format from file content
    ///
    /// Binary signatures win. Text content is refined by extension (a `.md`
    /// file is Markdown, anything else plain text). When the content is
    /// inconclusive the extension decides.
    pub fn detect_from_file(&self, path: &Path) -> FormatResult<DocumentFormat> {
        if !path.exists() {
            return Err(FormatError::file_not_found(path.to_path_buf()));
        }

        let head = Self::read_head(path)?;

        if let Some(format) = Self::detect_from_magic_bytes(&head) {
            return Ok(format);
        }

        let by_extension = DocumentFormat::from_path(path);

        if Self::looks_like_text(&head) {
            return Ok(by_extension
                .filter(DocumentFormat::is_text)
                .unwrap_or(DocumentFormat::PlainText));
        }

        by_extension.ok_or(FormatError::UnknownFormat)
    }

    /// MIME type of the file, or `""` when it cannot be determined
    pub fn detect_mime_type(&self, path: &Path) -> String {
        match self.detect_from_file(path) {
            Ok(format) => MimeType::from_format(format).primary().to_string(),
            Err(_) => String::new(),
        }
    }

    fn read_head(path: &Path) -> FormatResult<Vec<u8>> {
        let mut file = File::open(path)?;
        let mut buffer = vec![0u8; SNIFF_LEN];
        let mut filled = 0;
        while filled < buffer.len() {
            let n = file.read(&mut buffer[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buffer.truncate(filled);
        Ok(buffer)
    }

    /// Detects format from leading bytes
    fn detect_from_magic_bytes(buffer: &[u8]) -> Option<DocumentFormat> {
        if buffer.len() < 4 {
            return None;
        }

        if buffer.starts_with(b"%PDF-") {
            return Some(DocumentFormat::Pdf);
        }

        if buffer.starts_with(b"AT&TFORM") {
            return Some(DocumentFormat::Djvu);
        }

        // EPUB is a zip whose first entry is the uncompressed "mimetype" file
        if buffer.starts_with(b"PK\x03\x04")
            && buffer.len() >= 58
            && &buffer[30..58] == b"mimetypeapplication/epub+zip"
        {
            return Some(DocumentFormat::Epub);
        }

        if buffer.len() >= 68 && &buffer[60..68] == b"BOOKMOBI" {
            return Some(DocumentFormat::Mobi);
        }

        if buffer.starts_with(b"{\\rtf") {
            return Some(DocumentFormat::Rtf);
        }

        if buffer.starts_with(&[0x89, b'P', b'N', b'G']) {
            return Some(DocumentFormat::Png);
        }

        if buffer.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(DocumentFormat::Jpeg);
        }

        let lowered: Vec<u8> = buffer
            .iter()
            .skip_while(|b| b.is_ascii_whitespace())
            .take(15)
            .map(u8::to_ascii_lowercase)
            .collect();
        if lowered.starts_with(b"<!doctype html") || lowered.starts_with(b"<html") {
            return Some(DocumentFormat::Html);
        }

        None
    }

    /// UTF-8 without NUL bytes. A multi-byte sequence cut at the end of the
    /// sniffed window still counts as text.
    fn looks_like_text(buffer: &[u8]) -> bool {
        if buffer.is_empty() || buffer.contains(&0) {
            return false;
        }
        match std::str::from_utf8(buffer) {
            Ok(_) => true,
            Err(e) => e.error_len().is_none() && buffer.len() == SNIFF_LEN,
        }
    }
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new()
    }
}
