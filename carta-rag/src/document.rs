//! Data types for documents, chunks, and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A source document containing extracted text and metadata.
///
/// Immutable once loaded; the whole pipeline reads from one instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Identifier for the document (the source file stem).
    pub id: String,
    /// The full extracted text of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    pub metadata: HashMap<String, String>,
    /// Optional URI pointing to the original source file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

/// A contiguous segment of a [`Document`].
///
/// `index` is the chunk's position in document order and is the key that
/// ties a chunk to its embedding vector in the corpus index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Position of the chunk in document order, starting at 0.
    pub index: usize,
    /// The text content of the chunk. Never empty or whitespace-only.
    pub text: String,
}

/// A retrieved [`Chunk`] paired with its cosine-similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query, in `[-1, 1]`. Higher is more relevant.
    pub score: f32,
}
