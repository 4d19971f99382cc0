//! Answer generation from retrieved transcript context.
//!
//! The retrieved chunks are joined best-first into one context string, placed
//! into the answer prompt next to the question, and sent to the language model
//! once.

mod composer;
mod model;

pub use composer::{Answer, AnswerComposer, CONTEXT_SEPARATOR, DEFAULT_TEMPERATURE};
pub use model::{LanguageModel, OpenAIChatModel};
