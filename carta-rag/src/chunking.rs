//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`ParagraphChunker`],
//! which merges paragraphs into minimum-length chunks.

use crate::document::{Chunk, Document};

/// A strategy for splitting a document into chunks.
///
/// Returns chunks in document order; `Chunk::index` reflects that order.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has no usable text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Merges paragraphs into chunks of at least `min_chunk_size` characters.
///
/// The document text is split on blank-line boundaries into paragraphs;
/// consecutive paragraphs are accumulated (joined with a single space)
/// until the buffer reaches the minimum size, at which point it is closed
/// as a chunk. Only the final chunk may fall short of the minimum. A
/// single paragraph that already exceeds the minimum becomes its own
/// chunk unchanged; paragraphs are never split.
///
/// # Example
///
/// ```rust,ignore
/// use carta_rag::ParagraphChunker;
///
/// let chunker = ParagraphChunker::new(200);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    min_chunk_size: usize,
}

impl ParagraphChunker {
    /// Create a new `ParagraphChunker`.
    ///
    /// # Arguments
    ///
    /// * `min_chunk_size` — minimum number of characters per chunk
    pub fn new(min_chunk_size: usize) -> Self {
        Self { min_chunk_size }
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new(200)
    }
}

impl Chunker for ParagraphChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let paragraphs = document.text.split("\n\n").map(str::trim).filter(|p| !p.is_empty());

        let mut texts: Vec<String> = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for paragraph in paragraphs {
            if !buffer.is_empty() {
                buffer.push(' ');
                buffer_chars += 1;
            }
            buffer.push_str(paragraph);
            buffer_chars += paragraph.chars().count();

            if buffer_chars >= self.min_chunk_size {
                texts.push(std::mem::take(&mut buffer));
                buffer_chars = 0;
            }
        }

        if !buffer.is_empty() {
            texts.push(buffer);
        }

        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk { index, text: text.trim().to_string() })
            .collect()
    }
}
