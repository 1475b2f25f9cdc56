//! Mood chart error types

use thiserror::Error;

/// Errors from fetching mood data or mounting the chart
#[derive(Error, Debug)]
pub enum MoodError {
    /// Transport-level request failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint could not be reached
    #[error("Mood data endpoint unavailable")]
    Unavailable,

    /// The configured timeout elapsed
    #[error("Request timeout")]
    Timeout,

    /// The endpoint answered with a non-2xx status
    #[error("Mood data endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not a JSON object of numeric counts
    #[error("Invalid mood data: {0}")]
    Decode(String),

    /// No element with the chart's id exists on the page
    #[error("Chart element not found: {0}")]
    MissingChartElement(String),

    /// A chart is already bound to the element
    #[error("Chart already mounted on element: {0}")]
    AlreadyMounted(String),

    /// The fetch task was cancelled before completing
    #[error("Mood chart task cancelled")]
    Cancelled,

    /// The fetch task panicked
    #[error("Mood chart task failed: {0}")]
    TaskFailed(String),
}

impl From<serde_json::Error> for MoodError {
    fn from(err: serde_json::Error) -> Self {
        MoodError::Decode(err.to_string())
    }
}

/// Result type alias for mood chart operations
pub type MoodResult<T> = Result<T, MoodError>;
