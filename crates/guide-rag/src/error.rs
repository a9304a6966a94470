//! Error types for the question answering service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Question answering service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The question was missing or blank
    #[error("Please provide a question")]
    InvalidInput,

    /// The persisted vector index is missing or corrupt
    #[error("Vector index unavailable: {0}")]
    IndexUnavailable(String),

    /// Embedding service call failed
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Generation service call failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::IndexUnavailable(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidInput => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::IndexUnavailable(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::Embedding(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::Generation(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Json(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        // The wire contract is a flat body: {"error": "<message>"}
        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
