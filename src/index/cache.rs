//! Per-video cache of built indices.

use super::SimilarityIndex;
use crate::error::{Result, YtqaError};
use crate::video_id::VideoId;
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Cache mapping a video to its fully built index.
///
/// Entries expire `ttl` after insertion and the cache holds at most
/// `max_entries` videos. Concurrent requests for the same video share one
/// build; a failed build is not cached.
#[derive(Clone)]
pub struct IndexCache {
    inner: Cache<VideoId, Arc<SimilarityIndex>>,
}

impl IndexCache {
    /// Create a new cache.
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Return the cached index for a video, running `build` on a miss.
    pub async fn get_or_build<F>(&self, video_id: VideoId, build: F) -> Result<Arc<SimilarityIndex>>
    where
        F: Future<Output = Result<SimilarityIndex>>,
    {
        let key = video_id.clone();
        self.inner
            .try_get_with(key, async move {
                debug!("No cached index for {}, building", video_id);
                build.await.map(Arc::new)
            })
            .await
            .map_err(YtqaError::from_shared)
    }

    /// Remove one video's index. Returns whether it was present.
    pub async fn invalidate(&self, video_id: &VideoId) -> bool {
        self.inner.remove(video_id).await.is_some()
    }

    /// Number of live entries.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}
