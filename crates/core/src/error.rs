//! Error types for the LeiBooks core
//!
//! The core only fails in two ways:
//! - **InvalidArgument**: the caller passed something the model cannot accept
//!   (blank shelf name, page 0, unknown annotation id, bad search pattern).
//! - **UnsupportedOperation**: the capability does not exist for this variant
//!   (manual membership changes on a smart shelf, removing an unremovable shelf).
//!
//! Lookups that find nothing (unknown shelf, absent document) are not errors:
//! they answer `false`, `None` or do nothing.

use std::fmt;
use thiserror::Error;

/// How a caller should treat a failed core operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// The request was well formed but not supported here; safe to ignore
    Recoverable,
    /// The request itself was invalid and must be fixed by the caller
    Rejected,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Main error type for the core model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Operation not available for this kind of object
    #[error("Unsupported operation: {operation} - {reason}")]
    UnsupportedOperation { operation: String, reason: String },
}

impl CoreError {
    /// Creates an InvalidArgument error
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Creates an UnsupportedOperation error
    pub fn unsupported(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnsupportedOperation { .. } => ErrorSeverity::Recoverable,
            Self::InvalidArgument { .. } => ErrorSeverity::Rejected,
        }
    }

    /// Returns true for UnsupportedOperation
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    /// Returns a user-friendly message suitable for display in a UI
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument { argument, .. } => {
                format!("The value given for {} is not valid.", argument)
            }
            Self::UnsupportedOperation { reason, .. } => {
                format!("This action is not available: {}", reason)
            }
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = CoreError::invalid_argument("shelf name", "must not be blank");
        assert_eq!(
            err.to_string(),
            "Invalid argument: shelf name - must not be blank"
        );
    }

    #[test]
    fn test_unsupported_display() {
        let err = CoreError::unsupported("remove shelf", "This shelf cannot be removed.");
        assert_eq!(
            err.to_string(),
            "Unsupported operation: remove shelf - This shelf cannot be removed."
        );
    }

    #[test]
    fn test_severity() {
        assert_eq!(
            CoreError::unsupported("a", "b").severity(),
            ErrorSeverity::Recoverable
        );
        assert_eq!(
            CoreError::invalid_argument("a", "b").severity(),
            ErrorSeverity::Rejected
        );
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Rejected);
    }

    #[test]
    fn test_is_unsupported() {
        assert!(CoreError::unsupported("a", "b").is_unsupported());
        assert!(!CoreError::invalid_argument("a", "b").is_unsupported());
    }

    #[test]
    fn test_user_message() {
        let msg = CoreError::invalid_argument("page", "must be greater than zero").user_message();
        assert!(msg.contains("page"));

        let msg = CoreError::unsupported("add", "smart shelves are read-only").user_message();
        assert!(msg.contains("smart shelves are read-only"));
    }
}
