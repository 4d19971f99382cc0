//! YouTube transcript service backed by `yt-transcript-rs`.
//!
//! Track listing goes through the crate's transcript list; entries are fetched
//! for a single language so the selected track is the one returned.

use super::{CaptionEntry, TrackInfo, TrackList, TranscriptService};
use crate::error::{Result, ServiceError, ServiceResult, YtqaError};
use crate::video_id::VideoId;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Transcript service backed by youtube.com.
pub struct YoutubeTranscriptService {
    api: YouTubeTranscriptApi,
    timeout: Duration,
}

impl YoutubeTranscriptService {
    /// Create a service whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| YtqaError::Config(format!("Failed to create transcript client: {}", e)))?;
        Ok(Self { api, timeout })
    }

    async fn with_timeout<T, F>(&self, video_id: &str, request: F) -> ServiceResult<T>
    where
        F: Future<Output = std::result::Result<T, CouldNotRetrieveTranscript>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result.map_err(|e| map_error(video_id, e.reason.as_ref(), &e.to_string())),
            Err(_) => Err(ServiceError::Other(format!(
                "Transcript request for {} timed out after {:?}",
                video_id, self.timeout
            ))),
        }
    }
}

#[async_trait]
impl TranscriptService for YoutubeTranscriptService {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn list(&self, video_id: &VideoId) -> ServiceResult<TrackList> {
        let list = self
            .with_timeout(video_id.as_str(), self.api.list_transcripts(video_id.as_str()))
            .await?;

        let tracks: Vec<TrackInfo> = list
            .transcripts()
            .map(|t| TrackInfo {
                video_id: video_id.to_string(),
                language_code: t.language_code.clone(),
                language: t.language.clone(),
                is_generated: t.is_generated,
                locator: t.language_code.clone(),
            })
            .collect();

        debug!("Found {} caption tracks", tracks.len());
        Ok(TrackList::new(video_id.as_str(), tracks))
    }

    #[instrument(skip(self, track), fields(language = %track.language_code, generated = track.is_generated))]
    async fn fetch(&self, track: &TrackInfo) -> ServiceResult<Vec<CaptionEntry>> {
        let languages = [track.locator.as_str()];
        let fetched = self
            .with_timeout(
                &track.video_id,
                self.api.fetch_transcript(&track.video_id, &languages, false),
            )
            .await?;

        let entries: Vec<CaptionEntry> = fetched
            .snippets
            .into_iter()
            .map(|s| CaptionEntry::new(s.text, s.start, s.duration))
            .collect();

        debug!("Fetched {} caption entries", entries.len());
        Ok(entries)
    }
}

/// Map a retrieval failure onto the service error taxonomy.
///
/// Only a disabled transcript or a missing language mean "no transcript";
/// everything else is an acquisition problem.
fn map_error(
    video_id: &str,
    reason: Option<&CouldNotRetrieveTranscriptReason>,
    message: &str,
) -> ServiceError {
    match reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => {
            ServiceError::TranscriptsDisabled(video_id.to_string())
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound {
            requested_language_codes,
            ..
        }) => ServiceError::NoTranscriptFound {
            video_id: video_id.to_string(),
            languages: requested_language_codes.clone(),
        },
        _ => ServiceError::Other(message.to_string()),
    }
}
