// FILE: crates/library/src/error.rs

use leibooks_config::ConfigError;
use leibooks_core::CoreError;
use leibooks_formats::FormatError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Cannot read {}: {}", .path.display(), .reason)]
    Unreadable { path: PathBuf, reason: String },

    #[error("Metadata extraction failed: {0}")]
    MetadataError(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the file itself could not be reached
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::Unreadable { .. } | Self::Io(_)
        )
    }
}

impl From<anyhow::Error> for LibraryError {
    fn from(err: anyhow::Error) -> Self {
        Self::MetadataError(format!("{:#}", err))
    }
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
