//! Error types for slide text synchronization.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting, compiling, or submitting edits.
///
/// Malformed elements and unknown edit targets are not errors: they are
/// skipped and logged. Only collaborator failures and caller mistakes that
/// make the whole request meaningless surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode or encode JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The requested page does not exist in the presentation.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The Document Store has no document with this id.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The Document Store rejected a fetch or a batch submission.
    #[error("Document store error: {0}")]
    StoreError(String),

    /// A table cell key was not of the form `row-col`.
    #[error("Invalid table cell key: {0}")]
    InvalidCellKey(String),
}
