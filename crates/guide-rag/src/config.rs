//! Configuration for the question answering service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML config file
pub const CONFIG_ENV: &str = "GUIDE_RAG_CONFIG";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Vector index configuration
    #[serde(default)]
    pub index: IndexConfig,
    /// OpenAI API configuration
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl RagConfig {
    /// Load configuration from the file named by `GUIDE_RAG_CONFIG`,
    /// falling back to defaults when the variable is unset
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number
    #[serde(default = "default_port")]
    pub port: u16,
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
        }
    }
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory holding the persisted index (manifest.json + chunks.json)
    #[serde(default = "default_index_dir")]
    pub dir: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("user_guide_index"),
        }
    }
}

/// OpenAI API configuration
///
/// The API key is read from the `OPENAI_API_KEY` environment variable only
/// and is never part of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Embedding model name
    #[serde(default = "default_embed_model")]
    pub embed_model: String,
    /// Generation model name
    #[serde(default = "default_generate_model")]
    pub generate_model: String,
    /// Temperature for generation (0 keeps answers deterministic)
    #[serde(default)]
    pub temperature: f32,
    /// Request timeout in seconds, applied to each call independently
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            embed_model: "text-embedding-3-small".to_string(),
            generate_model: "gpt-4.1-nano".to_string(),
            temperature: 0.0,
            timeout_secs: 60,
        }
    }
}

impl OpenAiConfig {
    /// Read the API key from the environment
    ///
    /// A missing key is a configuration error; callers check this at startup
    /// so the process fails before accepting requests.
    pub fn api_key(&self) -> Result<String> {
        std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY environment variable not set".to_string()))
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Prompt assembly strategy
    #[serde(default)]
    pub strategy: ChainStrategy,
    /// Maximum assembled prompt size in characters
    ///
    /// A stuffed prompt over this limit fails the request instead of being
    /// truncated behind the caller's back.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            strategy: ChainStrategy::Stuff,
            max_prompt_chars: 32_768,
        }
    }
}

/// Prompt assembly strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChainStrategy {
    /// Insert every retrieved chunk verbatim into a single prompt
    #[default]
    Stuff,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_enable_cors() -> bool {
    true
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("user_guide_index")
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_embed_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_generate_model() -> String {
    "gpt-4.1-nano".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_top_k() -> usize {
    3
}

fn default_max_prompt_chars() -> usize {
    32_768
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.index.dir, PathBuf::from("user_guide_index"));
        assert_eq!(config.openai.embed_model, "text-embedding-3-small");
        assert_eq!(config.openai.generate_model, "gpt-4.1-nano");
        assert_eq!(config.openai.temperature, 0.0);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.generation.strategy, ChainStrategy::Stuff);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let partial = r#"
            [server]
            port = 8080

            [retrieval]
            top_k = 5
        "#;

        let config: RagConfig = toml::from_str(partial).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.openai.generate_model, "gpt-4.1-nano");
    }

    #[test]
    fn test_strategy_parses_lowercase() {
        let toml_str = r#"
            [generation]
            strategy = "stuff"
            max_prompt_chars = 1000
        "#;

        let config: RagConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.generation.strategy, ChainStrategy::Stuff);
        assert_eq!(config.generation.max_prompt_chars, 1000);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide-rag.toml");
        std::fs::write(&path, "[server\nport = false").unwrap();

        let result = RagConfig::from_file(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
