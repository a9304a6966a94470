//! guide-rag: retrieval-augmented question answering over a product user guide
//!
//! Loads a precomputed vector index at startup, retrieves the guide passages
//! most similar to a question, and asks a hosted language model to answer
//! from them. Embedding and generation are delegated to the OpenAI API; this
//! crate owns the retrieval pipeline and the HTTP surface.

pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{chunk::Chunk, query::AskRequest, response::AskResponse};
