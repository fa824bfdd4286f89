//! Error types for the ingestion pipeline

use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ingestion pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested object does not exist in the blob store
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    /// The blob store returned an unreadable or empty body
    #[error("Blob transfer failed: {0}")]
    BlobTransfer(String),

    /// Document parsing error (malformed or empty document)
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// Embedding input rejected before any provider call
    #[error("Invalid embedding input: {0}")]
    InvalidEmbeddingInput(String),

    /// Embedding provider returned a non-success status
    #[error("Embedding provider returned HTTP {status}: {body}")]
    EmbeddingHttp { status: u16, body: String },

    /// Embedding provider response is missing the expected vector data
    #[error("Malformed embedding response: {0}")]
    MalformedEmbeddingResponse(String),

    /// Vector index write failed (surfaced after retry exhaustion)
    #[error("Vector index write failed: {0}")]
    IndexWrite(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a blob transfer error
    pub fn blob_transfer(message: impl Into<String>) -> Self {
        Self::BlobTransfer(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create an invalid embedding input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidEmbeddingInput(message.into())
    }

    /// Create a malformed embedding response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedEmbeddingResponse(message.into())
    }

    /// Create a vector index write error
    pub fn index_write(message: impl Into<String>) -> Self {
        Self::IndexWrite(message.into())
    }
}
