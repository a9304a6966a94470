//! Persisted vector index: on-disk layout, loading, and similarity search
//!
//! An index is a directory holding `manifest.json` (metadata and checksum)
//! and `chunks.json` (passages with their embeddings), produced offline by
//! the index builder. It is loaded once at startup, validated against its
//! manifest, and then shared read-only across requests.

pub mod manifest;
pub mod store;

pub use manifest::IndexManifest;
pub use store::{cosine_similarity, ScoredChunk, VectorIndex};
