use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors while reading or writing the intents JSON document.
    #[error("Intent file error: {0}")]
    IntentFile(#[from] serde_json::Error),

    /// Represents errors from the HTTP client talking to the LLM API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a malformed or unreadable persisted model blob.
    #[error("Model format error: {0}")]
    ModelFormat(#[from] bincode::Error),

    /// Represents an unexpected LLM response (bad status, missing fields).
    #[error("LLM error: {0}")]
    Llm(String),

    /// Represents errors raised while fitting the classifier.
    #[error("Training error: {0}")]
    Training(String),

    /// Represents configuration-related errors (e.g., missing environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}
