//! Error types for the `carta-rag` crate.

use thiserror::Error;

/// Errors that can occur while building or querying the corpus index.
#[derive(Debug, Error)]
pub enum RagError {
    /// The source document could not be loaded or contains no usable text.
    #[error("Document error: {0}")]
    DocumentError(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The chunk/vector invariant of the corpus index was violated.
    #[error("Index error: {0}")]
    IndexError(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
