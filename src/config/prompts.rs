//! Prompt templates for ytqa.
//!
//! The answer template can be overridden by placing an `answer.toml` file in
//! the custom prompts directory.

use crate::error::{Result, YtqaError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub answer: AnswerPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt used to answer a question from retrieved transcript context.
///
/// The template must contain `{{context}}` and `{{question}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerPrompts {
    pub template: String,
}

impl Default for AnswerPrompts {
    fn default() -> Self {
        Self {
            template: r#"You are a helpful assistant. Use only the following context from a video transcript to answer the user's question. If the context does not contain the answer, say that the video does not cover it.

Context:
{{context}}

Question: {{question}}
Answer:"#
                .to_string(),
        }
    }
}

impl AnswerPrompts {
    fn validate(&self) -> Result<()> {
        for field in ["{{context}}", "{{question}}"] {
            if !self.template.contains(field) {
                return Err(YtqaError::Config(format!(
                    "Answer prompt template must contain {}",
                    field
                )));
            }
        }
        Ok(())
    }
}

impl Prompts {
    /// Load prompts, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let answer_path = custom_path.join("answer.toml");
            if answer_path.exists() {
                let content = std::fs::read_to_string(&answer_path)?;
                prompts.answer = toml::from_str(&content)?;
            }
        }

        prompts.answer.validate()?;
        Ok(prompts)
    }

    /// Render a template, replacing each `{{name}}` with its value.
    ///
    /// Substitution is a single left-to-right pass: text inserted from a
    /// variable is never scanned for further placeholders. Unknown
    /// placeholders are left as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];

            let Some(close) = after.find("}}") else {
                out.push_str(&rest[open..]);
                return out;
            };

            match vars.get(after[..close].trim()) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[open..open + close + 4]),
            }
            rest = &after[close + 2..];
        }

        out.push_str(rest);
        out
    }

    /// Render with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
