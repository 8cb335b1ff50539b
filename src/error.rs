//! Polish Error Types
//!
//! Centralized error handling for the correction pipeline and its adapters.

use thiserror::Error;

/// Central error type for Polish
#[derive(Error, Debug)]
pub enum PolishError {
    #[error("Please enter some text to fix.")]
    InvalidInput,

    #[error("Please set your Gemini API key first (polish key set <KEY>).")]
    MissingCredential,

    #[error("A correction is already in progress.")]
    Busy,

    /// Non-success status from the service, carrying its reported detail
    #[error("{0}")]
    RemoteService(String),

    #[error("Unexpected response format from Gemini.")]
    UnexpectedResponseFormat,

    #[error("Credential store error: {0}")]
    Credential(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Polish operations
pub type PolishResult<T> = Result<T, PolishError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for PolishError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        PolishError::Credential(err.to_string())
    }
}
