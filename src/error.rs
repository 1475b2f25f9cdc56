//! Crate-level error type
//!
//! Wraps the per-module errors for callers that drive several steps, such as
//! the command-line tool.

use thiserror::Error;

use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::mood::MoodError;
use crate::page::PageError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Mood(#[from] MoodError),

    #[error(transparent)]
    Page(#[from] PageError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_display() {
        let err: Error = MoodError::Cancelled.into();
        assert_eq!(err.to_string(), "Mood chart task cancelled");

        let err: Error = PageError::AlreadyReady.into();
        assert!(matches!(err, Error::Page(_)));
    }
}
