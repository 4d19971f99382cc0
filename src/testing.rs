//! Deterministic stand-ins for the external services, used by unit tests.

use crate::embedding::Embedder;
use crate::error::{ServiceError, ServiceResult};
use crate::rag::LanguageModel;
use crate::transcript::{CaptionEntry, TrackInfo, TrackList, TranscriptService};
use crate::video_id::VideoId;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum ServiceMode {
    Tracks(Vec<(TrackInfo, Vec<CaptionEntry>)>),
    Disabled,
    Failing(String),
}

/// In-memory transcript service.
pub struct StubTranscriptService {
    mode: ServiceMode,
    fetch_failure: Option<String>,
    list_calls: AtomicUsize,
}

impl StubTranscriptService {
    pub fn new() -> Self {
        Self::with_mode(ServiceMode::Tracks(Vec::new()))
    }

    /// A video whose transcripts are turned off.
    pub fn disabled() -> Self {
        Self::with_mode(ServiceMode::Disabled)
    }

    /// A service that fails every call with a transport-style error.
    pub fn failing(message: &str) -> Self {
        Self::with_mode(ServiceMode::Failing(message.to_string()))
    }

    fn with_mode(mode: ServiceMode) -> Self {
        Self {
            mode,
            fetch_failure: None,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Add a track with one caption entry per text.
    pub fn with_track(mut self, language_code: &str, generated: bool, texts: &[&str]) -> Self {
        if let ServiceMode::Tracks(tracks) = &mut self.mode {
            let info = TrackInfo {
                video_id: String::new(),
                language_code: language_code.to_string(),
                language: language_code.to_string(),
                is_generated: generated,
                locator: format!("{}:{}", language_code, generated),
            };
            let entries = texts
                .iter()
                .enumerate()
                .map(|(i, t)| CaptionEntry::new(*t, i as f64 * 2.0, 2.0))
                .collect();
            tracks.push((info, entries));
        }
        self
    }

    /// List tracks normally but fail every fetch.
    pub fn failing_fetch(mut self, message: &str) -> Self {
        self.fetch_failure = Some(message.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptService for StubTranscriptService {
    async fn list(&self, video_id: &VideoId) -> ServiceResult<TrackList> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Let concurrent callers interleave as they would over a network.
        tokio::task::yield_now().await;
        match &self.mode {
            ServiceMode::Tracks(tracks) => Ok(TrackList::new(
                video_id.as_str(),
                tracks.iter().map(|(info, _)| info.clone()).collect(),
            )),
            ServiceMode::Disabled => Err(ServiceError::TranscriptsDisabled(video_id.to_string())),
            ServiceMode::Failing(message) => Err(ServiceError::Other(message.clone())),
        }
    }

    async fn fetch(&self, track: &TrackInfo) -> ServiceResult<Vec<CaptionEntry>> {
        if let Some(message) = &self.fetch_failure {
            return Err(ServiceError::Other(message.clone()));
        }
        match &self.mode {
            ServiceMode::Tracks(tracks) => tracks
                .iter()
                .find(|(info, _)| info.locator == track.locator)
                .map(|(_, entries)| entries.clone())
                .ok_or_else(|| ServiceError::Other("unknown track".to_string())),
            ServiceMode::Disabled => Err(ServiceError::TranscriptsDisabled(track.video_id.clone())),
            ServiceMode::Failing(message) => Err(ServiceError::Other(message.clone())),
        }
    }
}

const DEFAULT_VOCABULARY: &[&str] = &[
    "sky", "blue", "water", "boil", "temperature", "degree", "ice", "melt", "zero",
];

/// Bag-of-words embedder over a fixed vocabulary.
///
/// Each dimension counts the words starting with one vocabulary entry, so
/// similarity follows lexical overlap and never depends on call order.
pub struct StubEmbedder {
    vocabulary: Vec<String>,
    reported_dimensions: Option<usize>,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::with_vocabulary(DEFAULT_VOCABULARY)
    }
}

impl StubEmbedder {
    pub fn with_vocabulary(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_string()).collect(),
            reported_dimensions: None,
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every call after the first `calls` succeed.
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Claim a dimensionality different from the vectors actually produced.
    pub fn misreport_dimensions(mut self, dimensions: usize) -> Self {
        self.reported_dimensions = Some(dimensions);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn vector(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        self.vocabulary
            .iter()
            .map(|term| words.iter().filter(|w| w.starts_with(term.as_str())).count() as f32)
            .collect()
    }

    fn record_call(&self) -> ServiceResult<()> {
        let previous = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_after {
            Some(limit) if previous >= limit => {
                Err(ServiceError::Other("embedding service unavailable".to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> ServiceResult<Vec<f32>> {
        self.record_call()?;
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> ServiceResult<Vec<Vec<f32>>> {
        self.record_call()?;
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.reported_dimensions.unwrap_or(self.vocabulary.len())
    }
}

/// Language model that records prompts and returns a canned reply.
pub struct StubLanguageModel {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, f32)>>,
}

impl StubLanguageModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(prompt, temperature)` received so far.
    pub fn calls(&self) -> Vec<(String, f32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for StubLanguageModel {
    async fn generate(&self, prompt: &str, temperature: f32) -> ServiceResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        self.reply.clone().map_err(ServiceError::Other)
    }
}
