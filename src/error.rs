//! Error types for ytqa.

use std::sync::Arc;
use thiserror::Error;

/// Failure reported by an external capability (transcript, embedding or
/// language-model service).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript found for video {video_id} in languages {languages:?}")]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for capability calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// The error kinds a caller needs to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad URL or empty question. The user must correct the input.
    InvalidInput,
    /// The video has no usable captions. Terminal for that video.
    TranscriptUnavailable,
    /// Transcript service failed.
    AcquisitionFailed,
    /// Embedding service failed while building or querying the index.
    IndexingFailed,
    /// Language model failed or returned nothing.
    GenerationFailed,
}

impl ErrorKind {
    /// Whether the caller may offer a retry for this kind of failure.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::AcquisitionFailed | ErrorKind::IndexingFailed | ErrorKind::GenerationFailed
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "invalid_input"),
            ErrorKind::TranscriptUnavailable => write!(f, "transcript_unavailable"),
            ErrorKind::AcquisitionFailed => write!(f, "acquisition_failed"),
            ErrorKind::IndexingFailed => write!(f, "indexing_failed"),
            ErrorKind::GenerationFailed => write!(f, "generation_failed"),
        }
    }
}

/// Library-level error type for ytqa operations.
#[derive(Error, Debug)]
pub enum YtqaError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcript is not available for video {video_id}")]
    TranscriptUnavailable {
        video_id: String,
        #[source]
        source: ServiceError,
    },

    #[error("Unexpected error while fetching transcript: {0}")]
    AcquisitionFailed(#[source] ServiceError),

    #[error("Indexing failed: {0}")]
    IndexingFailed(#[source] ServiceError),

    #[error("Generation failed: {0}")]
    GenerationFailed(#[source] ServiceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl YtqaError {
    /// The caller-facing kind, if this error comes from the question pipeline.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            YtqaError::InvalidInput(_) => Some(ErrorKind::InvalidInput),
            YtqaError::TranscriptUnavailable { .. } => Some(ErrorKind::TranscriptUnavailable),
            YtqaError::AcquisitionFailed(_) => Some(ErrorKind::AcquisitionFailed),
            YtqaError::IndexingFailed(_) => Some(ErrorKind::IndexingFailed),
            YtqaError::GenerationFailed(_) => Some(ErrorKind::GenerationFailed),
            YtqaError::Config(_) | YtqaError::Io(_) | YtqaError::TomlParse(_) => None,
        }
    }

    /// Recover an owned error from one shared between concurrent waiters.
    ///
    /// The sole owner gets the original back. Other holders get an error of
    /// the same kind whose cause is reduced to its message.
    pub fn from_shared(shared: Arc<YtqaError>) -> Self {
        match Arc::try_unwrap(shared) {
            Ok(err) => err,
            Err(shared) => {
                let cause = |source: &ServiceError| ServiceError::Other(source.to_string());
                match shared.as_ref() {
                    YtqaError::InvalidInput(msg) => YtqaError::InvalidInput(msg.clone()),
                    YtqaError::TranscriptUnavailable { video_id, source } => {
                        YtqaError::TranscriptUnavailable {
                            video_id: video_id.clone(),
                            source: cause(source),
                        }
                    }
                    YtqaError::AcquisitionFailed(source) => YtqaError::AcquisitionFailed(cause(source)),
                    YtqaError::IndexingFailed(source) => YtqaError::IndexingFailed(cause(source)),
                    YtqaError::GenerationFailed(source) => YtqaError::GenerationFailed(cause(source)),
                    YtqaError::Config(msg) => YtqaError::Config(msg.clone()),
                    YtqaError::Io(e) => YtqaError::Io(std::io::Error::new(e.kind(), e.to_string())),
                    YtqaError::TomlParse(e) => YtqaError::Config(e.to_string()),
                }
            }
        }
    }
}

/// Result type alias for ytqa operations.
pub type Result<T> = std::result::Result<T, YtqaError>;
