//! Index manifest: metadata describing a persisted index

use serde::{Deserialize, Serialize};

/// Metadata for a persisted index directory
///
/// Written by the index builder next to the chunk file; the loader refuses
/// any index whose manifest disagrees with the chunk data or with the
/// configured embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexManifest {
    /// Embedding model the chunks were embedded with
    pub embedding_model: String,
    /// Embedding dimensions
    pub dimensions: usize,
    /// Number of chunks in the chunk file
    pub chunk_count: usize,
    /// When the index was built
    pub built_at: chrono::DateTime<chrono::Utc>,
    /// Hex sha-256 of the chunk file contents
    pub checksum: String,
}

/// Compute the hex-encoded sha-256 checksum of the chunk file contents
pub fn checksum(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
