//! Error types for the `carta-gemini` crate.

use thiserror::Error;

/// Errors that can occur when talking to the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The API key was empty at client construction.
    #[error("API key must not be empty")]
    MissingApiKey,

    /// The HTTP request could not be sent or timed out.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API returned {status}: {message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The error message extracted from the response body.
        message: String,
    },

    /// The response body could not be deserialized.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The API answered successfully but returned no usable content.
    #[error("API returned no usable content")]
    EmptyResponse,
}

/// A convenience result type for Gemini API operations.
pub type Result<T> = std::result::Result<T, GeminiError>;
