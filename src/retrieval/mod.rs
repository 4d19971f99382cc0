//! Top-k retrieval of transcript chunks for a question.

use crate::embedding::Embedder;
use crate::error::{Result, YtqaError};
use crate::index::{SearchResult, SimilarityIndex};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of chunks retrieved per question.
pub const DEFAULT_K: usize = 4;

/// Chunks retrieved for one question, best match first.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalResult {
    pub results: Vec<SearchResult>,
}

impl RetrievalResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Chunk texts in rank order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.chunk.text.as_str())
    }
}

/// Embeds questions and queries an index.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl Retriever {
    /// Create a retriever returning the default 4 chunks.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            k: DEFAULT_K,
        }
    }

    /// Set the number of chunks to retrieve (at least one).
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k.max(1);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Retrieve the `k` chunks most similar to `question`.
    ///
    /// The index must have been built with the same embedder; a question
    /// embedding of a different dimensionality is an error.
    #[instrument(skip(self, index), fields(k = self.k, indexed = index.len()))]
    pub async fn retrieve(&self, question: &str, index: &SimilarityIndex) -> Result<RetrievalResult> {
        let query = self
            .embedder
            .embed(question)
            .await
            .map_err(YtqaError::IndexingFailed)?;

        let results = index
            .search(&query, self.k)
            .map_err(YtqaError::IndexingFailed)?;

        debug!(
            "Retrieved {} chunks (best score {:.3})",
            results.len(),
            results.first().map(|r| r.score).unwrap_or(0.0)
        );

        Ok(RetrievalResult { results })
    }
}
