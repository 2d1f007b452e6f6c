//! Error types and error handling for paper-rag.
//!
//! This module defines the error type used throughout the
//! application. Recoverable per-item failures (a paper that cannot
//! be fetched or extracted) are logged and skipped by the pipelines;
//! everything else propagates to the caller through `Result`.

use thiserror::Error;

/// Result type alias for paper-rag operations
pub type Result<T> = std::result::Result<T, PaperRagError>;

/// Main error type for paper-rag
#[derive(Error, Debug)]
pub enum PaperRagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Embedding failed ({provider}): {message}")]
    EmbeddingFailed { provider: String, message: String },

    #[error("Vector index error ({backend}): {message}")]
    IndexError { backend: String, message: String },

    #[error("Index returned malformed results at position {position}: {message}")]
    IndexShapeMismatch { position: usize, message: String },

    #[error("Generation failed ({backend}): {message}")]
    GenerationFailed { backend: String, message: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Chunk file error: {0}")]
    ChunkFileError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl PaperRagError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a configuration error (fatal at startup)
    pub fn is_config_error(&self) -> bool {
        matches!(self, PaperRagError::ConfigError(_) | PaperRagError::TomlError(_))
    }

    /// Check if a batch may skip the failing item and continue
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaperRagError::FetchFailed(_)
                | PaperRagError::ExtractionFailed(_)
                | PaperRagError::HttpError(_)
        )
    }

    /// Check if the error was caused by the user's input
    pub fn is_bad_request(&self) -> bool {
        matches!(self, PaperRagError::InvalidQuery(_))
    }
}
