//! Environment-driven application configuration.

use std::path::PathBuf;

use thiserror::Error;

use carta_rag::RagConfig;

/// Default location of the constitution PDF, relative to the working
/// directory.
pub const DEFAULT_PDF_PATH: &str = "data/constitution.pdf";

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = "gemini-embedding-001";

/// Default generation model.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";

/// Errors produced while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `GOOGLE_API_KEY` nor `GEMINI_API_KEY` is set.
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,

    /// A configuration value failed to parse or validate.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API credential for the Gemini API.
    pub api_key: String,
    /// Path to the source PDF.
    pub pdf_path: PathBuf,
    /// Embedding model name.
    pub embed_model: String,
    /// Generation model name.
    pub chat_model: String,
    /// Chunking and retrieval parameters.
    pub rag: RagConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// `GOOGLE_API_KEY` (or `GEMINI_API_KEY`) is required; everything
    /// else has a default. `CARTA_PDF`, `CARTA_EMBED_MODEL`,
    /// `CARTA_CHAT_MODEL`, `CARTA_TOP_K`, and `CARTA_MIN_CHUNK_SIZE`
    /// override the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no credential is set
    /// and [`ConfigError::Invalid`] when an override fails to parse or
    /// validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| ConfigError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let pdf_path = std::env::var("CARTA_PDF")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PDF_PATH));
        let embed_model =
            std::env::var("CARTA_EMBED_MODEL").unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string());
        let chat_model =
            std::env::var("CARTA_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        let mut rag = RagConfig::builder();
        if let Ok(value) = std::env::var("CARTA_TOP_K") {
            let top_k = value
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("CARTA_TOP_K: '{value}'")))?;
            rag = rag.top_k(top_k);
        }
        if let Ok(value) = std::env::var("CARTA_MIN_CHUNK_SIZE") {
            let size = value
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("CARTA_MIN_CHUNK_SIZE: '{value}'")))?;
            rag = rag.min_chunk_size(size);
        }
        let rag = rag.build().map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self { api_key, pdf_path, embed_model, chat_model, rag })
    }
}
