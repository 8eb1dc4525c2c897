//! Error types for document format operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for format operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur during format detection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format could not be determined
    #[error("Unknown or unsupported document format")]
    UnknownFormat,

    /// Content does not start with a known signature
    #[error("File content does not match a known format")]
    InvalidMagicBytes,

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// File not found or inaccessible
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },
}

impl FormatError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// True when the caller can fall back to a default instead of failing
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownFormat | Self::InvalidMagicBytes)
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
