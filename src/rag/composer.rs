//! Prompt assembly and the answering call.

use super::LanguageModel;
use crate::config::Prompts;
use crate::error::{Result, ServiceError, YtqaError};
use crate::index::SearchResult;
use crate::retrieval::RetrievalResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default sampling temperature for answers.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Separator placed between retrieved chunks in the context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// The model's answer to one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The generated answer.
    pub text: String,
    /// Chunks the answer was grounded on, best match first.
    pub sources: Vec<SearchResult>,
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds the grounded prompt and asks the language model once.
pub struct AnswerComposer {
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
    temperature: f32,
}

impl AnswerComposer {
    /// Create a composer with the default prompt and temperature.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            prompts: Prompts::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Join retrieved chunks, best match first.
    pub fn build_context(retrieval: &RetrievalResult) -> String {
        retrieval.texts().collect::<Vec<_>>().join(CONTEXT_SEPARATOR)
    }

    /// Fill the answer template with context and question.
    pub fn build_prompt(&self, retrieval: &RetrievalResult, question: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), Self::build_context(retrieval));
        vars.insert("question".to_string(), question.to_string());

        self.prompts
            .render_with_custom(&self.prompts.answer.template, &vars)
    }

    /// Generate the answer. Failures are reported, never retried.
    #[instrument(skip(self, retrieval), fields(sources = retrieval.len()))]
    pub async fn compose(&self, retrieval: &RetrievalResult, question: &str) -> Result<Answer> {
        let prompt = self.build_prompt(retrieval, question);
        debug!("Prompt has {} chars", prompt.len());

        let text = self
            .model
            .generate(&prompt, self.temperature)
            .await
            .map_err(YtqaError::GenerationFailed)?;

        if text.trim().is_empty() {
            return Err(YtqaError::GenerationFailed(ServiceError::EmptyResponse(
                "model returned an empty answer".to_string(),
            )));
        }

        info!("Generated answer ({} chars)", text.len());

        Ok(Answer {
            text: text.trim().to_string(),
            sources: retrieval.results.clone(),
        })
    }
}
