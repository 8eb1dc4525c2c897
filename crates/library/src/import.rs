// FILE: crates/library/src/import.rs

use crate::error::{LibraryError, LibraryResult};
use crate::metadata::{check_access, MetadataReader, MetadataReaders};
use leibooks_config::{ConfigManager, LibraryConfig};
use leibooks_core::{CoreError, Document, DocumentMetadata};
use std::fs;
use std::path::Path;

/// Turns files into documents
pub struct DocumentImporter {
    readers: MetadataReaders,
    config: LibraryConfig,
}

impl DocumentImporter {
    pub fn new() -> Self {
        Self::with_config(&LibraryConfig::default())
    }

    pub fn with_config(config: &LibraryConfig) -> Self {
        Self {
            readers: MetadataReaders::with_config(config),
            config: config.clone(),
        }
    }

    /// Uses the `library` section of the stored configuration
    ///
    /// `LEIBOOKS_*` environment variables override the file.
    ///
    /// # Errors
    ///
    /// `Config` when the file or an override is invalid.
    pub fn from_manager(manager: &ConfigManager) -> LibraryResult<Self> {
        let config = manager.load_with_env_overrides()?;
        Ok(Self::with_config(&config.library))
    }

    /// Swaps in a custom reader registry
    pub fn with_readers(mut self, readers: MetadataReaders) -> Self {
        self.readers = readers;
        self
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Builds a document for the file at `path`
    ///
    /// The document is dated today, the import date, whatever the file's own
    /// modification time. It is not added to any library.
    ///
    /// # Errors
    ///
    /// `FileNotFound` or `Unreadable` when the file cannot be opened (symbolic
    /// links count as unreadable unless `follow_symlinks` is set), `Core` for a
    /// blank title, `MetadataError` when the extracted facts are unusable.
    pub fn import(&self, title: &str, path: impl AsRef<Path>) -> LibraryResult<Document> {
        let path = path.as_ref();

        if title.trim().is_empty() {
            return Err(CoreError::invalid_argument("title", "must not be blank").into());
        }

        self.check_symlink(path)?;
        check_access(path)?;

        let extracted = if self.config.extract_metadata {
            self.readers.read(path)?
        } else {
            self.readers.generic().read(path)?
        };

        log::debug!(
            "Extracted {} ({}, {:?} pages, modified {})",
            path.display(),
            extracted.mime_type,
            extracted.num_pages,
            extracted.last_modified
        );

        let metadata =
            DocumentMetadata::today(extracted.authors, extracted.mime_type, extracted.num_pages);

        let document = Document::new(title, path, metadata).map_err(|e| match e {
            CoreError::InvalidArgument { argument, reason } if argument == "metadata" => {
                LibraryError::MetadataError(reason)
            }
            other => other.into(),
        })?;

        log::info!("Imported '{}' from {}", title, path.display());
        Ok(document)
    }

    fn check_symlink(&self, path: &Path) -> LibraryResult<()> {
        if self.config.follow_symlinks {
            return Ok(());
        }
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => Err(LibraryError::unreadable(
                path,
                "symbolic links are not followed",
            )),
            _ => Ok(()),
        }
    }
}

impl Default for DocumentImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leibooks_core::today;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_import_text_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.txt", b"Some plain notes\n");

        let document = DocumentImporter::new().import("Notes", &path).unwrap();
        assert_eq!(document.title(), "Notes");
        assert_eq!(document.author(), "n/a");
        assert_eq!(document.mime_type(), "text/plain");
        assert_eq!(document.num_pages(), Some(1));
        assert_eq!(document.last_modified(), today());
        assert!(document.path().is_absolute());
    }

    #[test]
    fn test_blank_title_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.txt", b"text");

        let err = DocumentImporter::new().import("  ", &path).unwrap_err();
        assert!(matches!(err, LibraryError::Core(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = DocumentImporter::new()
            .import("Ghost", dir.path().join("ghost.pdf"))
            .unwrap_err();
        assert!(matches!(err, LibraryError::FileNotFound(_)));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = DocumentImporter::new().import("Dir", dir.path()).unwrap_err();
        assert!(matches!(err, LibraryError::Unreadable { .. }));
    }

    #[test]
    fn test_extraction_disabled_skips_pdf_parsing() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.pdf", b"%PDF-1.4\n<< /Author (Someone) >>\n");

        let config = LibraryConfig {
            extract_metadata: false,
            ..LibraryConfig::default()
        };
        let document = DocumentImporter::with_config(&config).import("A", &path).unwrap();
        assert_eq!(document.mime_type(), "application/pdf");
        assert_eq!(document.author(), "n/a");
        assert_eq!(document.num_pages(), Some(1));
    }

    #[test]
    fn test_from_manager_reads_library_section() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path().join("config"));
        manager
            .update(|config| config.library.default_author = "Anonymous".to_string())
            .unwrap();
        let path = write_file(&dir, "notes.txt", b"text");

        let importer = DocumentImporter::from_manager(&manager).unwrap();
        assert_eq!(importer.config().default_author, "Anonymous");
        assert_eq!(importer.import("Notes", &path).unwrap().author(), "Anonymous");
    }

    #[test]
    fn test_from_manager_rejects_broken_file() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path().to_path_buf());
        fs::write(manager.config_path(), "library = [not toml").unwrap();

        let err = DocumentImporter::from_manager(&manager).err().unwrap();
        assert!(matches!(err, LibraryError::Config(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_follow_config() {
        let dir = TempDir::new().unwrap();
        let target = write_file(&dir, "target.txt", b"text");
        let link = dir.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = DocumentImporter::new().import("Link", &link).unwrap_err();
        assert!(matches!(err, LibraryError::Unreadable { .. }));

        let config = LibraryConfig {
            follow_symlinks: true,
            ..LibraryConfig::default()
        };
        assert!(DocumentImporter::with_config(&config).import("Link", &link).is_ok());
    }
}
