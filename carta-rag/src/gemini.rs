//! Gemini-backed [`EmbeddingProvider`] using the `carta-gemini` client.

use async_trait::async_trait;
use tracing::error;

use carta_gemini::{GeminiClient, GeminiError};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// An [`EmbeddingProvider`] backed by the Gemini embeddings API.
///
/// Uses `batchEmbedContents` for chunk precomputation and `embedContent`
/// per query, so both sides go through the same model and dimension.
pub struct GeminiEmbedder {
    client: GeminiClient,
    model: String,
    dimensions: usize,
}

impl GeminiEmbedder {
    /// Embedding dimensions for `gemini-embedding-001`.
    const DEFAULT_DIMENSIONS: usize = 3072;

    /// Create a new embedder over an existing client.
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into(), dimensions: Self::DEFAULT_DIMENSIONS }
    }
}

fn embedding_error(e: GeminiError) -> RagError {
    error!(provider = "Gemini", error = %e, "embedding request failed");
    RagError::EmbeddingError { provider: "Gemini".into(), message: e.to_string() }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed_content(&self.model, text).await.map_err(embedding_error)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.client.batch_embed_contents(&self.model, texts).await.map_err(embedding_error)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
