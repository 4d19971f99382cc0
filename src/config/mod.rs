//! Configuration module for ytqa.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts};
pub use settings::{
    CacheSettings, ChunkingSettings, EmbeddingSettings, GenerationSettings, PromptSettings,
    RetrievalSettings, Settings, TranscriptSettings,
};
