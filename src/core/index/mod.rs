//! Vector index backends.
//!
//! A [`VectorIndex`] stores embedded chunks and answers
//! nearest-neighbour queries. Query results come back in the
//! columnar shape used by Chroma (parallel `ids`, `documents`,
//! `metadatas` and `distances` lists); the retriever turns that
//! shape into typed results and validates it.
//!
//! Chunk provenance is stored as flat scalar metadata
//! ([`IndexMetadata`]) since index backends generally only accept
//! strings and numbers as metadata values. Author and category lists
//! are encoded as JSON arrays inside a string so that names containing
//! commas survive the round trip.

pub mod chroma;
pub mod memory;

use crate::core::error::{PaperRagError, Result};
use crate::core::types::{Chunk, ChunkMetadata};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use chroma::ChromaIndex;
pub use memory::MemoryIndex;

/// Id of the `n`th chunk ever written to an index
pub fn chunk_id(n: usize) -> String {
    format!("chunk_{n}")
}

/// Flat, index-friendly form of a chunk's provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub arxiv_id: String,
    pub title: String,
    /// Authors as a JSON array string
    pub authors: String,
    /// RFC 3339 timestamp
    pub published: String,
    /// Categories as a JSON array string
    pub categories: String,
    pub start_char: usize,
    pub end_char: usize,
}

impl IndexMetadata {
    pub fn from_chunk(chunk: &Chunk) -> Self {
        let meta = &chunk.metadata;
        Self {
            arxiv_id: meta.arxiv_id.clone(),
            title: meta.title.clone(),
            authors: encode_list(&meta.authors),
            published: meta.published.to_rfc3339(),
            categories: encode_list(&meta.categories),
            start_char: chunk.start_char,
            end_char: chunk.end_char,
        }
    }

    /// Coerce the flat metadata back into typed provenance
    pub fn to_chunk_metadata(&self) -> Result<ChunkMetadata> {
        let published = DateTime::parse_from_rfc3339(&self.published)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| PaperRagError::IndexError {
                backend: "metadata".to_string(),
                message: format!("invalid published timestamp '{}': {e}", self.published),
            })?;

        Ok(ChunkMetadata {
            arxiv_id: self.arxiv_id.clone(),
            title: self.title.clone(),
            authors: decode_list("authors", &self.authors)?,
            published,
            categories: decode_list("categories", &self.categories)?,
        })
    }

    /// Rebuild the chunk this metadata was cut from
    pub fn to_chunk(&self, text: String) -> Result<Chunk> {
        Ok(Chunk {
            text,
            start_char: self.start_char,
            end_char: self.end_char,
            metadata: self.to_chunk_metadata()?,
        })
    }
}

fn encode_list(items: &[String]) -> String {
    // Serializing a list of strings cannot fail
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

fn decode_list(field: &str, encoded: &str) -> Result<Vec<String>> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(encoded).map_err(|e| PaperRagError::IndexError {
        backend: "metadata".to_string(),
        message: format!("invalid {field} list '{encoded}': {e}"),
    })
}

/// One entry written to an index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub embedding: Vec<f32>,
    pub document: String,
    pub metadata: IndexMetadata,
}

/// Raw nearest-neighbour response for a single query vector
///
/// Columns are parallel: entry `i` of each list describes the same
/// hit. Backends fill gaps with `None` (or NaN for distances) rather
/// than dropping entries, so the retriever can detect them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexQueryResponse {
    pub ids: Vec<String>,
    pub documents: Vec<Option<String>>,
    pub metadatas: Vec<Option<serde_json::Value>>,
    pub distances: Vec<f32>,
}

/// A store of embedded chunks that supports similarity queries.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Backend name used in logs and errors
    fn name(&self) -> &str;

    /// Insert or replace records by id
    async fn upsert(&self, records: &[IndexRecord]) -> Result<()>;

    /// Return up to `k` nearest entries to `embedding`
    async fn query(&self, embedding: &[f32], k: usize) -> Result<IndexQueryResponse>;

    /// Number of entries in the index
    async fn count(&self) -> Result<usize>;
}
