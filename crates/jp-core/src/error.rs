//! Error types for the jackpot visualizer

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum JpError {
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for JpError {
    fn from(err: serde_json::Error) -> Self {
        JpError::Serialization(err.to_string())
    }
}

/// Result type alias
pub type JpResult<T> = Result<T, JpError>;
