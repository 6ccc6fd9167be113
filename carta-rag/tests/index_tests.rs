//! Retrieval tests for the corpus index: cosine similarity, top-K
//! selection, ordering, and tie-breaking.

use std::collections::HashMap;

use async_trait::async_trait;
use carta_rag::chunking::ParagraphChunker;
use carta_rag::document::{Chunk, Document};
use carta_rag::embedding::EmbeddingProvider;
use carta_rag::error::RagError;
use carta_rag::index::{CorpusIndex, cosine_similarity};
use proptest::prelude::*;

fn chunk(index: usize) -> Chunk {
    Chunk { index, text: format!("chunk {index}") }
}

/// A unit vector in 2D whose cosine similarity to `[1, 0]` is exactly `c`.
fn vector_with_cosine(c: f32) -> Vec<f32> {
    vec![c, (1.0 - c * c).sqrt()]
}

// ── Cosine similarity ──────────────────────────────────────────────

#[test]
fn self_similarity_is_one() {
    let v = vec![0.3, -1.2, 4.5, 0.01];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn zero_norm_vectors_score_zero() {
    let zero = vec![0.0, 0.0, 0.0];
    let v = vec![1.0, 2.0, 3.0];
    assert_eq!(cosine_similarity(&zero, &v), 0.0);
    assert_eq!(cosine_similarity(&v, &zero), 0.0);
}

proptest! {
    #[test]
    fn similarity_is_symmetric(
        a in proptest::collection::vec(-10.0f32..10.0, 8),
        b in proptest::collection::vec(-10.0f32..10.0, 8),
    ) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-6);
    }
}

// ── Top-K search ───────────────────────────────────────────────────

#[test]
fn returns_top_k_by_descending_similarity() {
    // Known similarities [0.9, 0.1, 0.95, 0.3, 0.5] against the query:
    // the top three must be chunks 2, 0, 4 in that order.
    let cosines = [0.9, 0.1, 0.95, 0.3, 0.5];
    let embeddings: Vec<Vec<f32>> = cosines.iter().map(|&c| vector_with_cosine(c)).collect();
    let chunks: Vec<Chunk> = (0..cosines.len()).map(chunk).collect();

    let index = CorpusIndex::from_parts(chunks, embeddings).unwrap();
    let results = index.search(&[1.0, 0.0], 3);

    let indexes: Vec<usize> = results.iter().map(|r| r.chunk.index).collect();
    assert_eq!(indexes, vec![2, 0, 4]);

    let expected = [0.95, 0.9, 0.5];
    for (result, want) in results.iter().zip(expected) {
        assert!((result.score - want).abs() < 1e-4);
    }
}

#[test]
fn fewer_chunks_than_k_returns_all_of_them() {
    let chunks = vec![chunk(0), chunk(1)];
    let embeddings = vec![vector_with_cosine(0.2), vector_with_cosine(0.8)];

    let index = CorpusIndex::from_parts(chunks, embeddings).unwrap();
    let results = index.search(&[1.0, 0.0], 3);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].chunk.index, 1);
}

#[test]
fn equal_scores_resolve_to_the_lower_index() {
    let chunks = vec![chunk(0), chunk(1), chunk(2)];
    let embeddings = vec![
        vector_with_cosine(0.7),
        vector_with_cosine(0.2),
        vector_with_cosine(0.7),
    ];

    let index = CorpusIndex::from_parts(chunks, embeddings).unwrap();
    let results = index.search(&[1.0, 0.0], 3);

    let indexes: Vec<usize> = results.iter().map(|r| r.chunk.index).collect();
    assert_eq!(indexes, vec![0, 2, 1]);
}

#[test]
fn zero_norm_query_scores_everything_zero_in_document_order() {
    let chunks = vec![chunk(0), chunk(1)];
    let embeddings = vec![vector_with_cosine(0.9), vector_with_cosine(0.1)];

    let index = CorpusIndex::from_parts(chunks, embeddings).unwrap();
    let results = index.search(&[0.0, 0.0], 2);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score == 0.0));
    assert_eq!(results[0].chunk.index, 0);
}

// ── Invariants ─────────────────────────────────────────────────────

#[test]
fn mismatched_counts_are_rejected() {
    let result = CorpusIndex::from_parts(vec![chunk(0), chunk(1)], vec![vec![1.0, 0.0]]);
    assert!(matches!(result, Err(RagError::IndexError(_))));
}

#[test]
fn inconsistent_dimensions_are_rejected() {
    let result = CorpusIndex::from_parts(
        vec![chunk(0), chunk(1)],
        vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]],
    );
    assert!(matches!(result, Err(RagError::IndexError(_))));
}

fn arb_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0, dim)
}

proptest! {
    #[test]
    fn search_is_ordered_and_bounded(
        embeddings in proptest::collection::vec(arb_embedding(16), 1..20),
        query in arb_embedding(16),
        top_k in 1usize..25,
    ) {
        let chunks: Vec<Chunk> = (0..embeddings.len()).map(chunk).collect();
        let count = chunks.len();

        let index = CorpusIndex::from_parts(chunks, embeddings).unwrap();
        let results = index.search(&query, top_k);

        prop_assert_eq!(results.len(), top_k.min(count));
        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}

// ── Building from a document ───────────────────────────────────────

/// Deterministic hash-based embeddings, so build-and-query tests run
/// with zero API keys.
struct MockEmbeddingProvider {
    dimensions: usize,
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> carta_rag::Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn doc(text: &str) -> Document {
    Document {
        id: "test".to_string(),
        text: text.to_string(),
        metadata: HashMap::new(),
        source_uri: None,
    }
}

#[tokio::test]
async fn build_and_query_round_trip() {
    let text = [
        "The legislature holds the power to enact, amend, and repeal laws on behalf of the \
         nation, and exercises this power through the procedures set out in this charter for \
         deliberation, voting, and promulgation of statutes across the whole territory.",
        "The judiciary is independent; judges rule according to the law and their own \
         conscience, free from instruction by any organ, authority, office, or person, and \
         their security of tenure is protected against removal without due cause.",
        "Everyone possesses inviolable fundamental rights and freedoms, which may be limited \
         only by statute and only in conformity with the letter and spirit of this charter, \
         without touching their essential core.",
    ]
    .join("\n\n");

    let provider = MockEmbeddingProvider { dimensions: 64 };
    let chunker = ParagraphChunker::new(200);
    let index = CorpusIndex::build(&doc(&text), &chunker, &provider).await.unwrap();

    assert_eq!(index.len(), 3);

    let results = index.query(&provider, "who makes the laws?", 3).await.unwrap();
    assert_eq!(results.len(), 3);
    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[tokio::test]
async fn empty_document_builds_an_empty_index() {
    let provider = MockEmbeddingProvider { dimensions: 64 };
    let chunker = ParagraphChunker::new(200);
    let index = CorpusIndex::build(&doc(""), &chunker, &provider).await.unwrap();

    assert!(index.is_empty());
    assert!(index.search(&[1.0, 0.0], 3).is_empty());
    assert!(index.chunks().is_empty());
}
