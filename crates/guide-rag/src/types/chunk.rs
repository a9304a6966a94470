//! Guide passage types

use serde::{Deserialize, Serialize};

/// A passage of the user guide with its stored embedding
///
/// Chunks are produced by the offline index builder and are immutable once
/// indexed; their identity is their position in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Passage text, inserted verbatim into prompts
    pub text: String,
    /// Label for where the passage came from (e.g. a guide section)
    ///
    /// Surfaced in logs only, never in responses.
    #[serde(default)]
    pub source: Option<String>,
    /// Embedding vector the index builder computed for the text
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a chunk without a source label
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            source: None,
            embedding,
        }
    }

    /// Attach a source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
