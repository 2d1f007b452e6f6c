//! Answer generation backends.
//!
//! A [`Generator`] turns an assembled prompt into an answer. The
//! placeholder backend is a valid configuration on its own: it lets
//! the whole pipeline run (and the prompt be inspected) without any
//! language model.

pub mod openai;

use crate::core::error::Result;
use async_trait::async_trait;

pub use openai::OpenAiGenerator;

/// Answer returned when no language model is configured, or when the
/// configured one fails
pub const PLACEHOLDER_ANSWER: &str = "[LLM response would go here - see prompt above]";

/// Produces an answer for a prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generator that always returns [`PLACEHOLDER_ANSWER`]
#[derive(Debug, Clone, Default)]
pub struct PlaceholderGenerator;

#[async_trait]
impl Generator for PlaceholderGenerator {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(PLACEHOLDER_ANSWER.to_string())
    }
}
