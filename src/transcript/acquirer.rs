//! Track selection and transcript assembly.

use super::{CaptionEntry, TranscriptService};
use crate::error::{Result, ServiceError, YtqaError};
use crate::video_id::VideoId;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Full spoken-text transcript of one video.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Video the transcript belongs to.
    pub video_id: VideoId,
    /// Caption texts joined by single spaces, in temporal order.
    pub text: String,
    /// Language code of the selected track.
    pub language_code: String,
    /// Whether the selected track was machine-generated.
    pub is_generated: bool,
}

/// Obtains transcripts, preferring human-authored captions.
pub struct TranscriptAcquirer {
    service: Arc<dyn TranscriptService>,
    languages: Vec<String>,
}

impl TranscriptAcquirer {
    /// Create an acquirer that looks for English tracks.
    pub fn new(service: Arc<dyn TranscriptService>) -> Self {
        Self {
            service,
            languages: vec!["en".to_string()],
        }
    }

    /// Set the language codes to try, in order of preference.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Acquire the transcript for a video.
    ///
    /// Selection is manual track, then generated track, then
    /// `TranscriptUnavailable`. There is no other-language fallback.
    #[instrument(skip(self), fields(video_id = %video_id))]
    pub async fn acquire(&self, video_id: &VideoId) -> Result<Transcript> {
        let tracks = self
            .service
            .list(video_id)
            .await
            .map_err(|e| classify(video_id, e))?;

        debug!("Video has {} caption tracks", tracks.tracks().len());

        let track = tracks
            .find_manual(&self.languages)
            .or_else(|_| tracks.find_generated(&self.languages))
            .map_err(|e| classify(video_id, e))?;

        info!(
            "Selected {} track ({})",
            if track.is_generated { "generated" } else { "manual" },
            track.language_code
        );

        let entries = self
            .service
            .fetch(track)
            .await
            .map_err(|e| classify(video_id, e))?;

        let text = join_entries(&entries);
        if text.is_empty() {
            return Err(YtqaError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                source: ServiceError::EmptyResponse("caption track has no text".to_string()),
            });
        }

        debug!("Transcript has {} entries, {} chars", entries.len(), text.chars().count());

        Ok(Transcript {
            video_id: video_id.clone(),
            text,
            language_code: track.language_code.clone(),
            is_generated: track.is_generated,
        })
    }
}

/// Join caption texts with single spaces, preserving order.
pub(crate) fn join_entries(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(|e| e.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn classify(video_id: &VideoId, err: ServiceError) -> YtqaError {
    match err {
        ServiceError::TranscriptsDisabled(_) | ServiceError::NoTranscriptFound { .. } => {
            YtqaError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                source: err,
            }
        }
        other => YtqaError::AcquisitionFailed(other),
    }
}
