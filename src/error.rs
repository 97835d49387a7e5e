//! Error handling for the legal document summarizer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Document format error: {0}")]
    Format(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SummarizerError>;

/// Convert anyhow errors (model loading surface) to our custom error type
impl From<anyhow::Error> for SummarizerError {
    fn from(err: anyhow::Error) -> Self {
        SummarizerError::ModelError(err.to_string())
    }
}

/// Convert HTTP client errors to our custom error type
impl From<reqwest::Error> for SummarizerError {
    fn from(err: reqwest::Error) -> Self {
        SummarizerError::Network(err.to_string())
    }
}
