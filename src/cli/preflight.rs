//! Pre-flight checks before contacting paid services.
//!
//! Catches missing credentials up front instead of after the transcript has
//! already been downloaded.

use crate::config::Settings;
use crate::error::{Result, YtqaError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Answering needs the embedding and generation API.
    Ask,
    /// Fetching a transcript has no credential requirements.
    Transcript,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ask => {
            // Custom endpoints (local servers) often run without a key.
            let custom_endpoint = settings.embedding.api_base.is_some()
                && settings.generation.api_base.is_some();
            if !custom_endpoint {
                check_api_key(std::env::var("OPENAI_API_KEY").ok().as_deref())?;
            }
        }
        Operation::Transcript => {}
    }
    Ok(())
}

fn check_api_key(key: Option<&str>) -> Result<()> {
    match key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        Some(_) => Err(YtqaError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        None => Err(YtqaError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}
