//! In-process providers for tests
//!
//! Both mocks count invocations so tests can assert that rejected input
//! never reaches a provider.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

pub(crate) struct MockEmbedder {
    vector: Vec<f32>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// Mock that returns the same vector for every input
    pub(crate) fn returning(vector: Vec<f32>) -> Self {
        Self {
            vector,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock that fails every call with the given message
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            vector: Vec::new(),
            failure: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of embed calls made so far
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(Error::Embedding(message.clone())),
            None => Ok(self.vector.clone()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "mock-embedder"
    }
}

pub(crate) struct MockLlm {
    answer: String,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockLlm {
    /// Mock that returns the same answer for every prompt
    pub(crate) fn returning(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock that fails every call with the given message
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            answer: String::new(),
            failure: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generate calls made so far
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(Error::Generation(message.clone())),
            None => Ok(self.answer.clone()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "mock-llm"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
