//! Retrieval core for the carta chatbot.
//!
//! The workflow is linear: [`load_pdf`] extracts the document text once,
//! a [`Chunker`] splits it into minimum-length chunks, an
//! [`EmbeddingProvider`] turns chunks into vectors, and the resulting
//! [`CorpusIndex`] answers top-K cosine-similarity queries for the rest
//! of the process lifetime. The index is immutable after construction.

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod gemini;
pub mod index;
pub mod loader;

pub use chunking::{Chunker, ParagraphChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use gemini::GeminiEmbedder;
pub use index::CorpusIndex;
pub use loader::load_pdf;
