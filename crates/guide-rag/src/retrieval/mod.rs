//! Query-time retrieval
//!
//! Embeds the query text and runs a similarity search over the in-memory
//! index. The index itself never changes after startup, so a retriever is
//! cheap to share across requests.

use std::sync::Arc;

use crate::error::Result;
use crate::index::{ScoredChunk, VectorIndex};
use crate::providers::EmbeddingProvider;

/// Finds the chunks most similar to a query
pub struct Retriever {
    /// Provider that embeds query text
    embedder: Arc<dyn EmbeddingProvider>,
    /// Read-only index shared with the rest of the app
    index: Arc<VectorIndex>,
}

impl Retriever {
    /// Create a retriever over an index
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Embed the query and return up to `k` chunks, best match first
    pub async fn search(&self, query_text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query_text).await?;
        self.index.search(&query_embedding, k)
    }
}
