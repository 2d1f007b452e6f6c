//! Core data types for paper-rag.
//!
//! This module defines the records that flow through the
//! ingestion and query pipelines: papers, chunks, retrieved chunks
//! and query results, plus the statistics reported by each stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A source paper, as returned by a document source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// arXiv identifier (e.g. `2301.01234v2`)
    pub arxiv_id: String,

    pub title: String,

    /// Author names in publication order
    pub authors: Vec<String>,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    pub published: DateTime<Utc>,

    /// arXiv category tags, primary category first
    pub categories: Vec<String>,

    /// Local path of the downloaded PDF (or plain-text file)
    pub pdf_path: PathBuf,
}

impl Document {
    /// Provenance copied onto every chunk cut from this document
    pub fn chunk_metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            arxiv_id: self.arxiv_id.clone(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            published: self.published,
            categories: self.categories.clone(),
        }
    }
}

/// Denormalized document provenance carried by each chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub arxiv_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub published: DateTime<Utc>,
    pub categories: Vec<String>,
}

/// A contiguous window of a document's cleaned text
///
/// Serializes as one flat object, which is the record format of the
/// persisted `chunks.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Trimmed chunk text (never empty)
    pub text: String,

    /// Character offset where the window starts in the cleaned text
    pub start_char: usize,

    /// Character offset one past the end of the window
    pub end_char: usize,

    #[serde(flatten)]
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Number of characters covered by the window (before trimming)
    pub fn span(&self) -> usize {
        self.end_char - self.start_char
    }
}

/// A chunk returned by a similarity query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// 1-based position in the result list
    pub rank: usize,

    /// Distance to the query (lower is more relevant, never negative)
    pub distance: f32,

    pub chunk: Chunk,
}

impl RetrievedChunk {
    pub fn title(&self) -> &str {
        &self.chunk.metadata.title
    }

    pub fn document_id(&self) -> &str {
        &self.chunk.metadata.arxiv_id
    }

    pub fn text(&self) -> &str {
        &self.chunk.text
    }
}

/// Outcome of one question put to the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub query: String,
    pub answer: String,
    pub prompt: String,
    pub sources: Vec<RetrievedChunk>,
}

/// Statistics from a download run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadStats {
    /// Papers returned by the search
    pub found: usize,

    /// Papers fetched during this run
    pub downloaded: usize,

    /// Papers whose PDF was already on disk
    pub already_present: usize,

    /// Papers skipped because the fetch failed
    pub failed: usize,
}

/// Statistics from a processing (extract, clean, chunk) run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessStats {
    /// Papers that produced at least one chunk
    pub papers_processed: usize,

    /// Papers skipped because no text could be extracted
    pub papers_skipped: usize,

    pub chunks_created: usize,

    pub duration_ms: u64,

    /// Chunk count per processed paper, in processing order
    pub per_document: Vec<DocumentChunkCount>,
}

/// Number of chunks cut from one paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunkCount {
    pub arxiv_id: String,
    pub title: String,
    pub chunks: usize,
}

/// Statistics from an indexing (embed, upsert) run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub chunks_indexed: usize,

    /// Sequence number of the first id assigned in this batch
    pub first_id: usize,

    /// Entries in the index after the batch
    pub total_in_index: usize,

    pub duration_ms: u64,
}
