//! Transcript chunking for embedding.
//!
//! Splits a transcript into bounded, overlapping segments. Each chunk after the
//! first starts exactly `overlap` characters before the previous chunk ended,
//! so neighbouring chunks share local context.

mod splitter;

pub use splitter::split_text;

use crate::error::{Result, YtqaError};
use serde::{Deserialize, Serialize};

/// A bounded segment of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of this chunk.
    pub text: String,
    /// Position of this chunk in the sequence.
    pub order: usize,
    /// Offset of the first character within the transcript, in characters.
    pub start_char: usize,
}

impl Chunk {
    pub fn new(text: impl Into<String>, order: usize, start_char: usize) -> Self {
        Self {
            text: text.into(),
            order,
            start_char,
        }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters.
    pub max_chunk_size: usize,
    /// Characters shared between neighbouring chunks.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl ChunkingConfig {
    pub fn new(max_chunk_size: usize, overlap: usize) -> Self {
        Self {
            max_chunk_size,
            overlap,
        }
    }

    /// Check that the configuration allows the window to advance.
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(YtqaError::Config(
                "chunking.max_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.max_chunk_size {
            return Err(YtqaError::Config(format!(
                "chunking.overlap ({}) must be smaller than chunking.max_chunk_size ({})",
                self.overlap, self.max_chunk_size
            )));
        }
        Ok(())
    }
}
