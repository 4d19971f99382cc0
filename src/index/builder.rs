//! Embeds chunks and builds a similarity index.

use super::SimilarityIndex;
use crate::chunking::Chunk;
use crate::embedding::Embedder;
use crate::error::{Result, ServiceError, YtqaError};
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Builds a [`SimilarityIndex`] from chunks, all or nothing.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
    max_concurrent: usize,
}

impl Indexer {
    /// Create an indexer that embeds in batches of 100, one batch at a time.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            batch_size: 100,
            max_concurrent: 1,
        }
    }

    /// Set the number of chunks sent per embedding request.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the number of embedding requests in flight at once.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Embed every chunk and build the index.
    ///
    /// Any failed request, missing embedding, or embedding of the wrong
    /// dimensionality fails the whole build.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len()))]
    pub async fn build(&self, chunks: Vec<Chunk>) -> Result<SimilarityIndex> {
        if chunks.is_empty() {
            return Err(YtqaError::IndexingFailed(ServiceError::Other(
                "transcript produced no chunks".to_string(),
            )));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embedder = &self.embedder;

        // `buffered` yields in submission order, so batches line up with chunks.
        let batches: Vec<Vec<Vec<f32>>> = stream::iter(texts.chunks(self.batch_size))
            .map(|batch| async move {
                let embeddings = embedder.embed_batch(batch).await?;
                if embeddings.len() != batch.len() {
                    return Err(ServiceError::Other(format!(
                        "Expected {} embeddings, got {}",
                        batch.len(),
                        embeddings.len()
                    )));
                }
                Ok::<_, ServiceError>(embeddings)
            })
            .buffered(self.max_concurrent)
            .try_collect()
            .await
            .map_err(YtqaError::IndexingFailed)?;

        debug!("Received {} embedding batches", batches.len());

        let pairs = chunks
            .into_iter()
            .zip(batches.into_iter().flatten())
            .collect();

        let index = SimilarityIndex::build(self.embedder.dimensions(), pairs)
            .map_err(YtqaError::IndexingFailed)?;

        info!("Indexed {} chunks ({} dimensions)", index.len(), index.dimensions());
        Ok(index)
    }
}
