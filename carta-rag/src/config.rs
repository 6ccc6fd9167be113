//! Configuration for the retrieval pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for chunking and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Minimum chunk size in characters. Paragraphs are merged until a
    /// chunk reaches this size; only the final chunk may fall short.
    pub min_chunk_size: usize,
    /// Number of top results to return from a similarity query.
    pub top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self { min_chunk_size: 200, top_k: 3 }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the minimum chunk size in characters.
    pub fn min_chunk_size(mut self, size: usize) -> Self {
        self.config.min_chunk_size = size;
        self
    }

    /// Set the number of top results to return from a similarity query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `min_chunk_size == 0` or
    /// `top_k == 0`.
    pub fn build(self) -> Result<RagConfig> {
        if self.config.min_chunk_size == 0 {
            return Err(RagError::ConfigError(
                "min_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = RagConfig::default();
        assert_eq!(config.min_chunk_size, 200);
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn builder_rejects_zero_top_k() {
        let result = RagConfig::builder().top_k(0).build();
        assert!(matches!(result, Err(RagError::ConfigError(_))));
    }

    #[test]
    fn builder_rejects_zero_min_chunk_size() {
        let result = RagConfig::builder().min_chunk_size(0).build();
        assert!(matches!(result, Err(RagError::ConfigError(_))));
    }
}
