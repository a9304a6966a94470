//! Turns retrieved context into a final answer
//!
//! The only chain strategy today is "stuff": every retrieved chunk goes into
//! one prompt. The prompt is size-checked before the provider is called, so
//! an oversized prompt fails without spending a request.

use std::sync::Arc;

use crate::config::{ChainStrategy, GenerationConfig};
use crate::error::{Error, Result};
use crate::providers::LlmProvider;

use super::prompt::PromptBuilder;

/// Produces an answer for a question given retrieved chunk texts
pub struct Synthesizer {
    /// Provider that generates the answer
    llm: Arc<dyn LlmProvider>,
    /// Chain strategy and prompt limits
    config: GenerationConfig,
}

impl Synthesizer {
    /// Create a synthesizer with the given generation settings
    pub fn new(llm: Arc<dyn LlmProvider>, config: GenerationConfig) -> Self {
        Self { llm, config }
    }

    /// Assemble the prompt and generate an answer
    pub async fn generate(&self, question: &str, contexts: &[String]) -> Result<String> {
        let prompt = match self.config.strategy {
            ChainStrategy::Stuff => {
                let context = PromptBuilder::build_context(contexts);
                PromptBuilder::build_qa_prompt(question, &context)
            }
        };

        let prompt_chars = prompt.chars().count();
        if prompt_chars > self.config.max_prompt_chars {
            return Err(Error::Generation(format!(
                "Prompt of {} characters exceeds the {} character limit",
                prompt_chars, self.config.max_prompt_chars
            )));
        }

        tracing::debug!(
            "Prompt assembled from {} chunks ({} characters)",
            contexts.len(),
            prompt_chars
        );

        let answer = self.llm.generate(&prompt).await?;

        // An empty generation is a failure, not an answer
        if answer.trim().is_empty() {
            return Err(Error::Generation(format!(
                "Model {} returned an empty answer",
                self.llm.model()
            )));
        }

        Ok(answer)
    }
}
