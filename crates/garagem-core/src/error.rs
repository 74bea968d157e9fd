//! Error types for garagem-core

use thiserror::Error;

/// Result type alias using garagem-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in garagem-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success response
    #[error("API error: {0}")]
    Api(String),

    /// Car not found
    #[error("Car not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Object storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
