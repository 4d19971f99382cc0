//! YouTube video identifier extraction.

use crate::error::{Result, YtqaError};
use regex::Regex;
use std::sync::LazyLock;

/// An 11-character token following `v=` or a path separator.
static URL_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("Invalid regex"));

/// A bare identifier with nothing around it.
static BARE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("Invalid regex"));

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a URL or bare identifier.
    pub fn parse(input: &str) -> Result<Self> {
        extract_video_id(input)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Watch page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video identifier from a YouTube URL or a bare identifier.
///
/// The input is not validated as a URL. The first 11-character token after
/// `v=` or `/` wins; otherwise the whole (trimmed) input must itself be an
/// identifier.
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    let input = input.trim();

    if let Some(caps) = URL_ID_REGEX.captures(input) {
        if let Some(m) = caps.get(1) {
            return Ok(VideoId(m.as_str().to_string()));
        }
    }

    if BARE_ID_REGEX.is_match(input) {
        return Ok(VideoId(input.to_string()));
    }

    Err(YtqaError::InvalidInput(format!(
        "Invalid YouTube URL: {}",
        input
    )))
}
