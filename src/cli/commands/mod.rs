//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod transcript;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use transcript::run_transcript;

use crate::config::Settings;

/// Apply per-invocation overrides from the command line.
fn apply_overrides(settings: &mut Settings, k: Option<usize>, model: Option<String>) {
    if let Some(k) = k {
        settings.retrieval.k = k;
    }
    if let Some(model) = model {
        settings.generation.model = model;
    }
}
