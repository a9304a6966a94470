//! Question-answering pipeline
//!
//! Validates the question, retrieves the most similar chunks, and hands
//! their text to the synthesizer. Validation happens first so a blank
//! question is rejected before any provider call.

use crate::error::{Error, Result};
use crate::generation::Synthesizer;
use crate::retrieval::Retriever;

/// End-to-end flow from question to answer
pub struct QueryPipeline {
    /// Finds relevant chunks
    retriever: Retriever,
    /// Generates the answer
    synthesizer: Synthesizer,
    /// How many chunks to retrieve per question
    top_k: usize,
}

impl QueryPipeline {
    /// Create a pipeline
    pub fn new(retriever: Retriever, synthesizer: Synthesizer, top_k: usize) -> Self {
        Self {
            retriever,
            synthesizer,
            top_k,
        }
    }

    /// Answer a question using retrieved guide content
    ///
    /// The question is embedded as received; trimming is only used to
    /// decide whether it is blank.
    pub async fn answer(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(Error::InvalidInput);
        }

        let results = self.retriever.search(question, self.top_k).await?;
        tracing::debug!("Retrieved {} chunks for the question", results.len());
        for scored in &results {
            tracing::debug!(
                "Context from {} (similarity {:.3})",
                scored.chunk.source.as_deref().unwrap_or("unlabeled"),
                scored.similarity
            );
        }

        let contexts: Vec<String> = results.into_iter().map(|r| r.chunk.text).collect();
        self.synthesizer.generate(question, &contexts).await
    }
}
