//! Provider abstractions for embeddings and answer generation
//!
//! Trait seams around the two external services the pipeline calls, so the
//! pipeline can be exercised without a network.

pub mod embedding;
pub mod llm;
pub mod openai;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use openai::OpenAiClient;

#[cfg(test)]
pub(crate) mod testing;
