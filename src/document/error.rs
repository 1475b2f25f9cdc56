//! Document error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Reading the HTML file failed
    #[error("Failed to read {path:?}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    /// The markup contains no element to act as the document root
    #[error("Document has no root element")]
    NoRootElement,
}

/// Result type alias for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
