//! Transcript acquisition.
//!
//! The [`TranscriptService`] trait is the narrow interface to whatever lists and
//! fetches caption tracks. [`TranscriptAcquirer`] applies the track selection
//! policy on top of it: manual English first, generated English second, fail
//! otherwise.

mod acquirer;
mod youtube;

pub use acquirer::{Transcript, TranscriptAcquirer};
pub use youtube::YoutubeTranscriptService;

use crate::error::{ServiceError, ServiceResult};
use crate::video_id::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single caption entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Metadata for one available caption track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Video this track belongs to.
    pub video_id: String,
    /// BCP-47-ish language code (e.g. "en", "en-GB").
    pub language_code: String,
    /// Human-readable language name.
    pub language: String,
    /// True for machine-generated (ASR) tracks.
    pub is_generated: bool,
    /// Service-specific locator used to fetch the entries.
    pub locator: String,
}

/// The set of tracks available for a video.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    video_id: String,
    tracks: Vec<TrackInfo>,
}

impl TrackList {
    pub fn new(video_id: impl Into<String>, tracks: Vec<TrackInfo>) -> Self {
        Self {
            video_id: video_id.into(),
            tracks,
        }
    }

    pub fn tracks(&self) -> &[TrackInfo] {
        &self.tracks
    }

    /// Find a manually authored track, trying `languages` in order.
    pub fn find_manual(&self, languages: &[String]) -> ServiceResult<&TrackInfo> {
        self.find(languages, false)
    }

    /// Find a machine-generated track, trying `languages` in order.
    pub fn find_generated(&self, languages: &[String]) -> ServiceResult<&TrackInfo> {
        self.find(languages, true)
    }

    fn find(&self, languages: &[String], generated: bool) -> ServiceResult<&TrackInfo> {
        languages
            .iter()
            .find_map(|lang| {
                self.tracks
                    .iter()
                    .find(|t| t.is_generated == generated && t.language_code == *lang)
            })
            .ok_or_else(|| ServiceError::NoTranscriptFound {
                video_id: self.video_id.clone(),
                languages: languages.to_vec(),
            })
    }
}

/// Trait for transcript service implementations.
#[async_trait]
pub trait TranscriptService: Send + Sync {
    /// List the caption tracks available for a video.
    async fn list(&self, video_id: &VideoId) -> ServiceResult<TrackList>;

    /// Fetch the ordered caption entries of one track.
    async fn fetch(&self, track: &TrackInfo) -> ServiceResult<Vec<CaptionEntry>>;
}
