//! Configuration management for paper-rag.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with defaults matching a small local
//! setup: feature-hashing embeddings, an on-disk in-memory index
//! and a placeholder answer generator.

use crate::core::error::{PaperRagError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Target characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

/// Document source (arXiv) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Free-text search query
    #[serde(default = "default_query")]
    pub query: String,

    /// arXiv category filter (e.g. `quant-ph`, `hep-th`)
    #[serde(default = "default_category")]
    pub category: Option<String>,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_arxiv_api_url")]
    pub api_url: String,

    /// Pause after each PDF download, in seconds
    #[serde(default = "default_download_delay")]
    pub download_delay_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Which embedding backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Local feature-hashing embedder (no network)
    Hashing,
    /// OpenAI-compatible `/embeddings` endpoint
    OpenAi,
}

/// Embedding configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_provider")]
    pub provider: EmbeddingProviderKind,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Vector length (used by the hashing embedder)
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Texts sent per embedding request
    #[serde(default = "default_embedding_batch_size")]
    pub batch_size: usize,
}

/// Which vector index backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    /// In-process cosine index persisted as a JSON snapshot
    Memory,
    /// Chroma server over its REST API
    Chroma,
}

/// Vector index configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    #[serde(default = "default_index_backend")]
    pub backend: IndexBackend,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_chroma_url")]
    pub chroma_url: String,
}

/// Retrieval configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Chunks retrieved per question
    #[serde(default = "default_k")]
    pub default_k: usize,

    #[serde(default = "default_max_k")]
    pub max_k: usize,
}

/// Which answer generator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorBackend {
    /// Returns a fixed placeholder answer
    Placeholder,
    /// OpenAI-compatible `/chat/completions` endpoint
    OpenAi,
}

/// Answer generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "default_generator_backend")]
    pub backend: GeneratorBackend,

    #[serde(default = "default_generation_model")]
    pub model: String,

    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for papers, chunks and the local index
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Directory holding downloaded PDFs
    pub fn papers_dir(&self) -> PathBuf {
        self.data_dir.join("raw_papers")
    }

    /// Paper manifest written by the download step
    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join("papers.json")
    }

    /// Chunk file written by the process step
    pub fn chunks_path(&self) -> PathBuf {
        self.data_dir.join("processed").join("chunks.json")
    }

    /// Snapshot file of the local in-memory index
    pub fn index_snapshot_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join("index").join(format!("{collection}.json"))
    }
}

// Default value functions
fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_query() -> String {
    "quantum mechanics".to_string()
}

fn default_category() -> Option<String> {
    Some("quant-ph".to_string())
}

fn default_max_results() -> usize {
    20
}

fn default_arxiv_api_url() -> String {
    "http://export.arxiv.org/api/query".to_string()
}

fn default_download_delay() -> u64 {
    3
}

fn default_request_timeout() -> u64 {
    60
}

fn default_embedding_provider() -> EmbeddingProviderKind {
    EmbeddingProviderKind::Hashing
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_dimensions() -> usize {
    384
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_embedding_batch_size() -> usize {
    64
}

fn default_index_backend() -> IndexBackend {
    IndexBackend::Memory
}

fn default_collection() -> String {
    "research_papers".to_string()
}

fn default_chroma_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_k() -> usize {
    3
}

fn default_max_k() -> usize {
    50
}

fn default_generator_backend() -> GeneratorBackend {
    GeneratorBackend::Placeholder
}

fn default_generation_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
            category: default_category(),
            max_results: default_max_results(),
            api_url: default_arxiv_api_url(),
            download_delay_secs: default_download_delay(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            model: default_embedding_model(),
            dimensions: default_dimensions(),
            api_base: default_openai_api_base(),
            api_key_env: default_api_key_env(),
            batch_size: default_embedding_batch_size(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: default_index_backend(),
            collection: default_collection(),
            chroma_url: default_chroma_url(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: default_generator_backend(),
            model: default_generation_model(),
            api_base: default_openai_api_base(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl FromStr for EmbeddingProviderKind {
    type Err = PaperRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hashing" => Ok(Self::Hashing),
            "openai" => Ok(Self::OpenAi),
            other => Err(PaperRagError::ConfigError(format!(
                "Unknown embedding provider '{other}' (expected 'hashing' or 'openai')"
            ))),
        }
    }
}

impl FromStr for IndexBackend {
    type Err = PaperRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "chroma" => Ok(Self::Chroma),
            other => Err(PaperRagError::ConfigError(format!(
                "Unknown index backend '{other}' (expected 'memory' or 'chroma')"
            ))),
        }
    }
}

impl FromStr for GeneratorBackend {
    type Err = PaperRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "openai" => Ok(Self::OpenAi),
            other => Err(PaperRagError::ConfigError(format!(
                "Unknown generation backend '{other}' (expected 'placeholder' or 'openai')"
            ))),
        }
    }
}

impl fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashing => write!(f, "hashing"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl fmt::Display for IndexBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Chroma => write!(f, "chroma"),
        }
    }
}

impl fmt::Display for GeneratorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "placeholder"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| PaperRagError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. PAPER_RAG_CONFIG env var
    /// 2. XDG config file (~/.config/paper-rag/config.toml)
    /// 3. ./paper-rag.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Some(config_path) = XdgDirs::explicit_config_file() {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("paper-rag.toml").exists() {
                Self::from_file("paper-rag.toml")?
            } else {
                Self::default()
            }
        };

        // Use the XDG data directory unless one was configured explicitly
        if config.storage.data_dir == default_data_dir() {
            config.storage.data_dir = xdg.data_dir.clone();
        }

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    ///
    /// Numeric values that fail to parse are ignored; unknown backend
    /// names are an error.
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(chunk_size) = env::var("PAPER_RAG_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.chunking.chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("PAPER_RAG_CHUNK_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.chunking.chunk_overlap = o;
            }
        }

        if let Ok(query) = env::var("PAPER_RAG_QUERY") {
            self.source.query = query;
        }
        if let Ok(category) = env::var("PAPER_RAG_CATEGORY") {
            self.source.category = if category.trim().is_empty() {
                None
            } else {
                Some(category)
            };
        }
        if let Ok(max_results) = env::var("PAPER_RAG_MAX_RESULTS") {
            if let Ok(n) = max_results.parse() {
                self.source.max_results = n;
            }
        }

        if let Ok(provider) = env::var("PAPER_RAG_EMBEDDING_PROVIDER") {
            self.embedding.provider = provider.parse()?;
        }
        if let Ok(model) = env::var("PAPER_RAG_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }

        if let Ok(backend) = env::var("PAPER_RAG_INDEX_BACKEND") {
            self.index.backend = backend.parse()?;
        }
        if let Ok(url) = env::var("PAPER_RAG_CHROMA_URL") {
            self.index.chroma_url = url;
        }

        if let Ok(default_k) = env::var("PAPER_RAG_DEFAULT_K") {
            if let Ok(k) = default_k.parse() {
                self.retrieval.default_k = k;
            }
        }

        if let Ok(backend) = env::var("PAPER_RAG_GENERATION_BACKEND") {
            self.generation.backend = backend.parse()?;
        }
        if let Ok(model) = env::var("PAPER_RAG_GENERATION_MODEL") {
            self.generation.model = model;
        }

        if let Ok(data_dir) = env::var("PAPER_RAG_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(PaperRagError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(PaperRagError::ConfigError(format!(
                "Chunk overlap ({}) must be less than chunk size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }

        if self.source.max_results == 0 {
            return Err(PaperRagError::ConfigError(
                "Max results must be non-zero".to_string(),
            ));
        }

        if self.embedding.dimensions == 0 {
            return Err(PaperRagError::ConfigError(
                "Embedding dimensions must be non-zero".to_string(),
            ));
        }

        if self.embedding.batch_size == 0 {
            return Err(PaperRagError::ConfigError(
                "Embedding batch size must be non-zero".to_string(),
            ));
        }

        if self.index.collection.trim().is_empty() {
            return Err(PaperRagError::ConfigError(
                "Collection name must not be empty".to_string(),
            ));
        }

        if self.retrieval.default_k == 0 {
            return Err(PaperRagError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.retrieval.default_k > self.retrieval.max_k {
            return Err(PaperRagError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(PaperRagError::ConfigError(format!(
                "Temperature {} is out of range (0.0-2.0)",
                self.generation.temperature
            )));
        }

        Ok(())
    }

    /// Log configuration
    ///
    /// API keys are never stored in the config, only the names of the
    /// environment variables that hold them.
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Chunking: {} chars, {} overlap",
            self.chunking.chunk_size,
            self.chunking.chunk_overlap
        );
        tracing::info!(
            "  Source: '{}' (category: {:?}, max {})",
            self.source.query,
            self.source.category,
            self.source.max_results
        );
        tracing::info!(
            "  Embedding: {} ({}, {} dims)",
            self.embedding.provider,
            self.embedding.model,
            self.embedding.dimensions
        );
        tracing::info!(
            "  Index: {} (collection: {})",
            self.index.backend,
            self.index.collection
        );
        tracing::info!("  Default k: {}", self.retrieval.default_k);
        tracing::info!(
            "  Generation: {} ({})",
            self.generation.backend,
            self.generation.model
        );
        tracing::info!("  Data dir: {:?}", self.storage.data_dir);
    }
}
