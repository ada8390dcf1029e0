//! Error types for loading user pages.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while reading or decoding a page of user records.
///
/// Individual malformed fields never surface here; they are dropped during
/// decoding. These variants cover failures that leave no records to work on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The page file could not be read.
    #[error("failed to read users file at '{path}': {message}")]
    Read {
        /// Path to the users file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The document is not valid JSON, or the envelope lacks a `users` array.
    #[error("invalid users JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The document is valid JSON but neither an envelope nor an array.
    #[error("expected a users envelope or array, found {found}")]
    UnexpectedShape {
        /// JSON kind found at the document root.
        found: &'static str,
    },
}
