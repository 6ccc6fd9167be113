//! Minimal client for the Google Generative Language REST API.
//!
//! Covers exactly the two capabilities carta needs: text generation
//! (`generateContent`) and embeddings (`embedContent` /
//! `batchEmbedContents`). Authentication is an API key sent in the
//! `x-goog-api-key` header.

pub mod client;
pub mod error;


pub use client::GeminiClient;
pub use error::{GeminiError, Result};
