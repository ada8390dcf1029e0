//! Error types for the report CLI.

use thiserror::Error;

use crate::error::SourceError;

/// Error returned when parsing a report view name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report view '{value}'; expected departments, summary, or full")]
pub struct ParseReportViewError {
    /// The rejected view name.
    pub value: String,
}

/// Errors surfaced while resolving settings and building a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Neither an input file nor a synthetic count was supplied.
    #[error("missing input: supply --input or --generate")]
    MissingInput,
    /// Both an input file and a synthetic count were supplied.
    #[error("conflicting input: --input and --generate are mutually exclusive")]
    ConflictingInput,
    /// The input path is not valid UTF-8.
    #[error("input path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the rejected path.
        path: String,
    },
    /// The requested view is not recognised.
    #[error(transparent)]
    View(#[from] ParseReportViewError),
    /// Records could not be loaded.
    #[error("failed to load users: {0}")]
    Source(#[from] SourceError),
    /// The report could not be serialised.
    #[error("failed to render report: {message}")]
    Render {
        /// Serializer error message.
        message: String,
    },
}
