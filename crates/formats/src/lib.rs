//! Document format table, MIME types and content sniffing

mod detection;
mod error;
mod format;
mod mime;

// Re-export all types
pub use detection::FormatDetector;
pub use error::{FormatError, FormatResult};
pub use format::DocumentFormat;
pub use mime::MimeType;

pub mod prelude {
    pub use crate::{DocumentFormat, FormatDetector, FormatError, FormatResult, MimeType};
}
