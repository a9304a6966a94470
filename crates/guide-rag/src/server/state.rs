//! Application state for the question-answering server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::Synthesizer;
use crate::index::VectorIndex;
use crate::pipeline::QueryPipeline;
use crate::providers::{EmbeddingProvider, LlmProvider, OpenAiClient};
use crate::retrieval::Retriever;

/// Shared application state
///
/// Built once at startup and cloned per request. Everything inside is
/// read-only, so clones are cheap and handlers never take locks.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Vector index loaded at startup
    index: Arc<VectorIndex>,
    /// Question-answering pipeline
    pipeline: QueryPipeline,
}

impl AppState {
    /// Create new application state
    ///
    /// Fails when the API key is missing or the index cannot be loaded, so
    /// the server never starts half-configured.
    pub async fn new(config: &RagConfig) -> Result<Self> {
        let api_key = config.openai.api_key()?;

        if config.retrieval.top_k == 0 {
            return Err(Error::Config(
                "retrieval.top_k must be at least 1".to_string(),
            ));
        }

        let index = Arc::new(VectorIndex::load(
            &config.index.dir,
            &config.openai.embed_model,
        )?);
        tracing::info!(
            "Vector index loaded: {} chunks, {} dimensions",
            index.len(),
            index.dimensions()
        );

        let client = Arc::new(OpenAiClient::new(&config.openai, api_key)?);
        let embedder: Arc<dyn EmbeddingProvider> = client.clone();
        let llm: Arc<dyn LlmProvider> = client;

        match embedder.health_check().await {
            Ok(true) => tracing::info!("Embedding provider {} reachable", embedder.name()),
            _ => tracing::warn!(
                "Embedding provider {} health check failed, continuing startup",
                embedder.name()
            ),
        }
        match llm.health_check().await {
            Ok(true) => tracing::info!("LLM provider {} reachable", llm.name()),
            _ => tracing::warn!(
                "LLM provider {} health check failed, continuing startup",
                llm.name()
            ),
        }

        Ok(Self::assemble(config, index, embedder, llm))
    }

    /// Create state from already-built providers and index
    pub fn with_providers(
        config: &RagConfig,
        index: Arc<VectorIndex>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self::assemble(config, index, embedding_provider, llm_provider)
    }

    fn assemble(
        config: &RagConfig,
        index: Arc<VectorIndex>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Self {
        let retriever = Retriever::new(embedding_provider, Arc::clone(&index));
        let synthesizer = Synthesizer::new(llm_provider, config.generation.clone());
        let pipeline = QueryPipeline::new(retriever, synthesizer, config.retrieval.top_k);

        Self {
            inner: Arc::new(AppStateInner { index, pipeline }),
        }
    }

    /// Get the vector index
    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.inner.index
    }

    /// Get the question-answering pipeline
    pub fn pipeline(&self) -> &QueryPipeline {
        &self.inner.pipeline
    }
}
