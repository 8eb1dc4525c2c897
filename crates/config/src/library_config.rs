//! Library and import configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Author recorded when none can be extracted
pub const UNKNOWN_AUTHOR: &str = "n/a";

/// Document import settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Author used when a file does not name one
    pub default_author: String,

    /// Read author and page count from file contents
    pub extract_metadata: bool,

    /// Accept symbolic links when importing
    pub follow_symlinks: bool,

    /// Extension (without dot) to MIME type, consulted before content sniffing
    pub mime_overrides: BTreeMap<String, String>,
}

impl LibraryConfig {
    /// The configured MIME type for `path`'s extension, if any
    pub fn mime_override(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.mime_overrides.get(&ext).map(String::as_str)
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_author: UNKNOWN_AUTHOR.to_string(),
            extract_metadata: true,
            follow_symlinks: false,
            mime_overrides: BTreeMap::new(),
        }
    }
}

impl ConfigSection for LibraryConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![Validator::not_empty(
            &self.default_author,
            "library.default_author",
        )];

        for (ext, mime) in &self.mime_overrides {
            let field = format!("library.mime_overrides.{}", ext);
            results.push(Validator::extension(ext, &field));
            results.push(Validator::mime_type(mime, &field));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.default_author = other.default_author;
        self.extract_metadata = other.extract_metadata;
        self.follow_symlinks = other.follow_symlinks;
        self.mime_overrides = other.mime_overrides;
    }

    fn section_name(&self) -> &'static str {
        "library"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LibraryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_author, "n/a");
        assert!(config.extract_metadata);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_empty_default_author() {
        let config = LibraryConfig {
            default_author: " ".to_string(),
            ..LibraryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_overrides_report_each_field() {
        let mut config = LibraryConfig::default();
        config
            .mime_overrides
            .insert(".txt".to_string(), "plain".to_string());

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.field == "library.mime_overrides..txt"));
    }

    #[test]
    fn test_mime_override_lookup() {
        let mut config = LibraryConfig::default();
        config
            .mime_overrides
            .insert("nfo".to_string(), "text/plain".to_string());

        assert_eq!(config.mime_override(Path::new("/x/readme.NFO")), Some("text/plain"));
        assert_eq!(config.mime_override(Path::new("/x/readme.pdf")), None);
        assert_eq!(config.mime_override(Path::new("/x/readme")), None);
    }

    #[test]
    fn test_merge() {
        let mut base = LibraryConfig::default();
        let mut other = LibraryConfig::default();
        other.extract_metadata = false;
        other.default_author = "Anonymous".to_string();

        base.merge(other);
        assert!(!base.extract_metadata);
        assert_eq!(base.default_author, "Anonymous");
    }
}
