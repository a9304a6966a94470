//! Loading and searching the persisted vector index

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Chunk;

use super::manifest::{checksum, IndexManifest};

/// Manifest filename inside an index directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Chunk filename inside an index directory
pub const CHUNKS_FILE: &str = "chunks.json";

/// Search result with chunk and similarity
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is more similar)
    pub similarity: f32,
}

/// In-memory vector index over the guide passages
///
/// Immutable after `load`; shared across requests behind an `Arc` with no
/// locking. Search is an exact cosine scan over all chunks, so a given query
/// vector always produces the same ranked set.
pub struct VectorIndex {
    chunks: Vec<Chunk>,
    manifest: IndexManifest,
}

impl VectorIndex {
    /// Load and validate a persisted index
    ///
    /// Every failure mode here (missing files, malformed JSON, checksum or
    /// dimension disagreement, model mismatch, empty index) is an
    /// `IndexUnavailable` error; callers treat it as fatal at startup.
    pub fn load(dir: &Path, expected_model: &str) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_raw = fs::read_to_string(&manifest_path).map_err(|e| {
            Error::index(format!("cannot read {}: {}", manifest_path.display(), e))
        })?;
        let manifest: IndexManifest = serde_json::from_str(&manifest_raw).map_err(|e| {
            Error::index(format!("malformed {}: {}", manifest_path.display(), e))
        })?;

        if manifest.embedding_model != expected_model {
            return Err(Error::index(format!(
                "index was built with embedding model '{}' but '{}' is configured",
                manifest.embedding_model, expected_model
            )));
        }

        let chunks_path = dir.join(CHUNKS_FILE);
        let chunks_raw = fs::read(&chunks_path).map_err(|e| {
            Error::index(format!("cannot read {}: {}", chunks_path.display(), e))
        })?;

        let actual_checksum = checksum(&chunks_raw);
        if actual_checksum != manifest.checksum {
            return Err(Error::index(format!(
                "checksum mismatch for {}: manifest says {}, file is {}",
                chunks_path.display(),
                manifest.checksum,
                actual_checksum
            )));
        }

        let chunks: Vec<Chunk> = serde_json::from_slice(&chunks_raw).map_err(|e| {
            Error::index(format!("malformed {}: {}", chunks_path.display(), e))
        })?;

        if chunks.is_empty() {
            return Err(Error::index("index contains no chunks"));
        }

        if chunks.len() != manifest.chunk_count {
            return Err(Error::index(format!(
                "manifest says {} chunks, file has {}",
                manifest.chunk_count,
                chunks.len()
            )));
        }

        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.embedding.len() != manifest.dimensions {
                return Err(Error::index(format!(
                    "chunk {} has {} dimensions, manifest says {}",
                    i,
                    chunk.embedding.len(),
                    manifest.dimensions
                )));
            }
        }

        Ok(Self { chunks, manifest })
    }

    /// Write an index directory for the given chunks
    ///
    /// Used by the offline index builder; the manifest is derived from the
    /// chunks (dimensions from the first one, checksum over the serialized
    /// file) so `load` will accept the result.
    pub fn write(dir: &Path, embedding_model: &str, chunks: &[Chunk]) -> Result<IndexManifest> {
        let dimensions = match chunks.first() {
            Some(chunk) => chunk.embedding.len(),
            None => return Err(Error::index("cannot write an empty index")),
        };

        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.embedding.len() != dimensions {
                return Err(Error::index(format!(
                    "chunk {} has {} dimensions, expected {}",
                    i,
                    chunk.embedding.len(),
                    dimensions
                )));
            }
        }

        fs::create_dir_all(dir)?;

        let chunks_raw = serde_json::to_vec_pretty(chunks)?;
        let manifest = IndexManifest {
            embedding_model: embedding_model.to_string(),
            dimensions,
            chunk_count: chunks.len(),
            built_at: chrono::Utc::now(),
            checksum: checksum(&chunks_raw),
        };

        fs::write(dir.join(CHUNKS_FILE), &chunks_raw)?;
        fs::write(
            dir.join(MANIFEST_FILE),
            serde_json::to_vec_pretty(&manifest)?,
        )?;

        Ok(manifest)
    }

    /// Search for the chunks most similar to a query embedding
    ///
    /// Returns up to `top_k` results ordered most-similar-first. Ties keep
    /// index order, so the ranking is deterministic for a given index.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>> {
        if query_embedding.len() != self.manifest.dimensions {
            return Err(Error::embedding(format!(
                "query embedding has {} dimensions, index expects {}",
                query_embedding.len(),
                self.manifest.dimensions
            )));
        }

        let mut results: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .map(|chunk| ScoredChunk {
                chunk: chunk.clone(),
                similarity: cosine_similarity(query_embedding, &chunk.embedding),
            })
            .collect();

        // Stable sort keeps equal scores in chunk order
        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        results.truncate(top_k);

        Ok(results)
    }

    /// Embedding dimensions of the loaded index
    pub fn dimensions(&self) -> usize {
        self.manifest.dimensions
    }

    /// Number of chunks in the index
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The manifest the index was loaded with
    pub fn manifest(&self) -> &IndexManifest {
        &self.manifest
    }

    /// Build an in-memory index directly from chunks, bypassing disk
    #[cfg(test)]
    pub(crate) fn from_chunks(chunks: Vec<Chunk>, embedding_model: &str) -> Self {
        let dimensions = chunks.first().map(|c| c.embedding.len()).unwrap_or(0);
        let manifest = IndexManifest {
            embedding_model: embedding_model.to_string(),
            dimensions,
            chunk_count: chunks.len(),
            built_at: chrono::Utc::now(),
            checksum: String::new(),
        };
        Self { chunks, manifest }
    }
}

/// Cosine similarity between two vectors
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chunks() -> Vec<Chunk> {
        vec![
            Chunk::new("Open Settings and choose Reset Password.", vec![1.0, 0.0])
                .with_source("Account"),
            Chunk::new("The dashboard shows recent activity.", vec![0.0, 1.0])
                .with_source("Dashboard"),
            Chunk::new("Password rules require twelve characters.", vec![0.8, 0.6])
                .with_source("Account"),
        ]
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manifest =
            VectorIndex::write(dir.path(), "text-embedding-3-small", &sample_chunks()).unwrap();

        assert_eq!(manifest.chunk_count, 3);
        assert_eq!(manifest.dimensions, 2);

        let index = VectorIndex::load(dir.path(), "text-embedding-3-small").unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.dimensions(), 2);
        assert!(!index.is_empty());
        assert_eq!(index.manifest().embedding_model, "text-embedding-3-small");
        assert_eq!(index.manifest().checksum, manifest.checksum);
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = VectorIndex::load(&missing, "text-embedding-3-small");
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_load_rejects_model_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        VectorIndex::write(dir.path(), "text-embedding-3-small", &sample_chunks()).unwrap();

        let result = VectorIndex::load(dir.path(), "text-embedding-3-large");
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_load_rejects_tampered_chunks() {
        let dir = tempfile::tempdir().unwrap();
        VectorIndex::write(dir.path(), "text-embedding-3-small", &sample_chunks()).unwrap();

        // Any edit to the chunk file invalidates the manifest checksum
        let chunks_path = dir.path().join(CHUNKS_FILE);
        let mut raw = std::fs::read_to_string(&chunks_path).unwrap();
        raw.push(' ');
        std::fs::write(&chunks_path, raw).unwrap();

        let result = VectorIndex::load(dir.path(), "text-embedding-3-small");
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_load_rejects_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        VectorIndex::write(dir.path(), "text-embedding-3-small", &sample_chunks()).unwrap();

        // The checksum covers the chunk file, not the manifest, so a
        // manifest edit has to be caught by the field checks
        let manifest_path = dir.path().join(MANIFEST_FILE);
        let raw = std::fs::read_to_string(&manifest_path).unwrap();
        let mut manifest: IndexManifest = serde_json::from_str(&raw).unwrap();
        manifest.dimensions = 5;
        std::fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest).unwrap()).unwrap();

        let result = VectorIndex::load(dir.path(), "text-embedding-3-small");
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_load_rejects_chunk_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        VectorIndex::write(dir.path(), "text-embedding-3-small", &sample_chunks()).unwrap();

        let manifest_path = dir.path().join(MANIFEST_FILE);
        let raw = std::fs::read_to_string(&manifest_path).unwrap();
        let mut manifest: IndexManifest = serde_json::from_str(&raw).unwrap();
        manifest.chunk_count = 2;
        std::fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest).unwrap()).unwrap();

        let result = VectorIndex::load(dir.path(), "text-embedding-3-small");
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_load_rejects_empty_chunk_list() {
        let dir = tempfile::tempdir().unwrap();

        // A self-consistent manifest over an empty chunk file is still refused
        let chunks_raw = b"[]";
        let manifest = IndexManifest {
            embedding_model: "text-embedding-3-small".to_string(),
            dimensions: 2,
            chunk_count: 0,
            built_at: chrono::Utc::now(),
            checksum: checksum(chunks_raw),
        };
        std::fs::write(dir.path().join(CHUNKS_FILE), chunks_raw).unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            serde_json::to_vec_pretty(&manifest).unwrap(),
        )
        .unwrap();

        let result = VectorIndex::load(dir.path(), "text-embedding-3-small");
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_load_rejects_malformed_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{not json").unwrap();

        let result = VectorIndex::load(dir.path(), "text-embedding-3-small");
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_write_rejects_empty_and_ragged_chunks() {
        let dir = tempfile::tempdir().unwrap();

        let empty = VectorIndex::write(dir.path(), "m", &[]);
        assert!(matches!(empty, Err(Error::IndexUnavailable(_))));

        let ragged = vec![
            Chunk::new("a", vec![1.0, 0.0]),
            Chunk::new("b", vec![1.0, 0.0, 0.0]),
        ];
        let result = VectorIndex::write(dir.path(), "m", &ragged);
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let index = VectorIndex::from_chunks(sample_chunks(), "text-embedding-3-small");

        let results = index.search(&[1.0, 0.0], 3).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].chunk.text, "Open Settings and choose Reset Password.");
        // Ordering is non-increasing
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_search_respects_top_k() {
        let index = VectorIndex::from_chunks(sample_chunks(), "text-embedding-3-small");

        assert_eq!(index.search(&[1.0, 0.0], 2).unwrap().len(), 2);
        // k larger than the index returns everything
        assert_eq!(index.search(&[1.0, 0.0], 10).unwrap().len(), 3);
    }

    #[test]
    fn test_search_is_idempotent() {
        let index = VectorIndex::from_chunks(sample_chunks(), "text-embedding-3-small");

        let first = index.search(&[0.6, 0.4], 3).unwrap();
        let second = index.search(&[0.6, 0.4], 3).unwrap();

        let texts = |results: &[ScoredChunk]| {
            results.iter().map(|r| r.chunk.text.clone()).collect::<Vec<_>>()
        };
        assert_eq!(texts(&first), texts(&second));
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.similarity, b.similarity);
        }
    }

    #[test]
    fn test_search_rejects_wrong_dimensions() {
        let index = VectorIndex::from_chunks(sample_chunks(), "text-embedding-3-small");

        let result = index.search(&[1.0, 0.0, 0.0], 3);
        assert!(matches!(result, Err(Error::Embedding(_))));
    }
}
