//! In-memory similarity index over embedded chunks.
//!
//! An index is built once per video by the [`Indexer`] and only read
//! afterwards. It is never handed out half-built: construction either yields a
//! complete index or an error.

mod builder;
mod cache;

pub use builder::Indexer;
pub use cache::IndexCache;

use crate::chunking::Chunk;
use crate::error::{ServiceError, ServiceResult};

/// A chunk with its similarity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Cosine similarity (higher is better).
    pub score: f32,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// Exhaustive cosine-similarity index.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl SimilarityIndex {
    /// Build an index from `(chunk, embedding)` pairs.
    ///
    /// Every embedding must have exactly `dimensions` components.
    pub fn build(dimensions: usize, pairs: Vec<(Chunk, Vec<f32>)>) -> ServiceResult<Self> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (chunk, embedding) in pairs {
            if embedding.len() != dimensions {
                return Err(ServiceError::DimensionMismatch {
                    expected: dimensions,
                    actual: embedding.len(),
                });
            }
            entries.push(IndexEntry { chunk, embedding });
        }
        Ok(Self { dimensions, entries })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` most similar chunks, best first.
    ///
    /// Returns every chunk when the index holds fewer than `k`. Equal scores
    /// keep the original chunk order. A query from a different embedding space
    /// (wrong dimensionality) is rejected.
    pub fn search(&self, query: &[f32], k: usize) -> ServiceResult<Vec<SearchResult>> {
        if query.len() != self.dimensions {
            return Err(ServiceError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk.order.cmp(&b.chunk.order))
        });
        results.truncate(k);

        Ok(results)
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
