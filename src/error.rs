//! Error handling for the job matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, JobMatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for JobMatcherError {
    fn from(err: anyhow::Error) -> Self {
        JobMatcherError::Processing(err.to_string())
    }
}

impl From<tokio::task::JoinError> for JobMatcherError {
    fn from(err: tokio::task::JoinError) -> Self {
        JobMatcherError::Processing(format!("Scoring task failed: {}", err))
    }
}
