//! The immutable corpus index: chunks, their embeddings, and top-K
//! cosine-similarity search.
//!
//! The index is built exactly once at startup and shared read-only for
//! the rest of the process. An exact linear scan is sufficient here: a
//! constitution-length document yields tens to low hundreds of chunks,
//! so no approximate-nearest-neighbor structure is warranted.

use tracing::{info, warn};

use crate::chunking::Chunker;
use crate::document::{Chunk, Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// An immutable index over one document's chunks and their embeddings.
///
/// Chunks and embeddings are parallel: index `i` of one corresponds to
/// index `i` of the other, and both are frozen after construction.
///
/// # Example
///
/// ```rust,ignore
/// use carta_rag::{CorpusIndex, ParagraphChunker};
///
/// let index = CorpusIndex::build(&document, &chunker, &embedder).await?;
/// let results = index.query(&embedder, "what does article 1 say?", 3).await?;
/// ```
#[derive(Debug)]
pub struct CorpusIndex {
    chunks: Vec<Chunk>,
    embeddings: Vec<Vec<f32>>,
}

impl CorpusIndex {
    /// Build the index: chunk the document, embed every chunk in one
    /// batch, and freeze the result.
    ///
    /// # Errors
    ///
    /// Returns an embedding error if the provider fails, or
    /// [`RagError::IndexError`] if the provider returns a vector count
    /// that does not match the chunk count.
    pub async fn build(
        document: &Document,
        chunker: &dyn Chunker,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        let chunks = chunker.chunk(document);
        if chunks.is_empty() {
            warn!(document.id = %document.id, "document produced no chunks");
            return Ok(Self { chunks: Vec::new(), embeddings: Vec::new() });
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = provider.embed_batch(&texts).await?;

        let index = Self::from_parts(chunks, embeddings)?;
        info!(
            document.id = %document.id,
            chunk_count = index.len(),
            dimensions = provider.dimensions(),
            "corpus index built"
        );
        Ok(index)
    }

    /// Assemble an index from pre-computed parts.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexError`] if the chunk and embedding counts
    /// differ, or if the embedding vectors are not all the same length.
    pub fn from_parts(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(RagError::IndexError(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        if let Some(first) = embeddings.first() {
            if embeddings.iter().any(|e| e.len() != first.len()) {
                return Err(RagError::IndexError(
                    "embedding vectors have inconsistent dimensions".to_string(),
                ));
            }
        }
        Ok(Self { chunks, embeddings })
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The indexed chunks, in document order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Return the `top_k` chunks most similar to the query embedding,
    /// ordered by descending score.
    ///
    /// Returns `min(top_k, len())` results. Equal scores resolve to the
    /// lower chunk index first: entries start in document order and the
    /// sort is stable, so ties never reorder.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<SearchResult> {
        let mut scored: Vec<SearchResult> = self
            .chunks
            .iter()
            .zip(&self.embeddings)
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }

    /// Embed a query string and search the index in one step.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures from the provider.
    pub async fn query(
        &self,
        provider: &dyn EmbeddingProvider,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let query_embedding = provider.embed(query).await?;
        Ok(self.search(&query_embedding, top_k))
    }
}
