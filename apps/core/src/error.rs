use std::io;
use thiserror::Error;

use crate::actors::messages::ActorError;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// Every variant renders a message through `Display` that a front-end can show as-is.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents failures talking to the store actor (closed channel, dropped reply).
    #[error("Actor error: {0}")]
    Actor(#[from] ActorError),

    /// Represents transport-level failures reaching the analysis endpoint.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The analysis endpoint answered with a non-success status code.
    #[error("Analysis request failed with status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// The analysis endpoint answered with a body that does not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents errors reported by a speech recognition or transcription collaborator.
    #[error("Speech error: {0}")]
    Speech(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP request timed out: {}", err))
        } else if err.is_decode() {
            AppError::Decode(format!("HTTP body decode error: {}", err))
        } else {
            AppError::Http(err.to_string())
        }
    }
}
