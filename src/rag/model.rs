//! Language model capability.

use crate::error::{Result, ServiceError, ServiceResult};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Trait for single-shot text generation.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `prompt` at the given sampling temperature.
    async fn generate(&self, prompt: &str, temperature: f32) -> ServiceResult<String>;
}

/// Chat-completions model behind an OpenAI-compatible API.
pub struct OpenAIChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAIChatModel {
    /// Create a model client, optionally pointed at a compatible endpoint.
    pub fn new(model: &str, api_base: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: create_client(api_base)?,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for OpenAIChatModel {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate(&self, prompt: &str, temperature: f32) -> ServiceResult<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(temperature)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ServiceError::EmptyResponse("model returned no choices".to_string()))?;

        debug!("Model returned {} chars", answer.len());
        Ok(answer)
    }
}
