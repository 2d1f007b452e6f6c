//! Sentence-aware, UTF-8 safe text chunking.
//!
//! Splits cleaned paper text into overlapping windows of roughly
//! `chunk_size` characters. Near each cut the chunker looks up to
//! [`BOUNDARY_SEARCH`] characters either side for the end of a
//! sentence and snaps the cut to just after the last one it finds,
//! so chunks tend to start and end on whole sentences.
//!
//! All sizes and offsets are measured in **characters** (Unicode
//! scalar values) via `char_indices()`, never bytes, so multi-byte
//! input can never split a code point.
//!
//! # Example
//!
//! ```
//! use paper_rag::core::ingest::Chunker;
//! # use paper_rag::core::types::ChunkMetadata;
//! # use chrono::Utc;
//! # let metadata = ChunkMetadata {
//! #     arxiv_id: "2301.00001v1".to_string(),
//! #     title: "A Paper".to_string(),
//! #     authors: vec![],
//! #     published: Utc::now(),
//! #     categories: vec![],
//! # };
//!
//! let chunker = Chunker::new(1000, 200).unwrap();
//! let chunks = chunker.chunk("Short text fits in one chunk.", &metadata);
//! assert_eq!(chunks.len(), 1);
//! ```

use crate::core::error::{PaperRagError, Result};
use crate::core::types::{Chunk, ChunkMetadata};
use once_cell::sync::Lazy;
use regex::Regex;

/// How far (in characters) around a cut to look for a sentence end
pub const BOUNDARY_SEARCH: usize = 100;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s").expect("sentence boundary regex is valid"));

/// Overlapping, sentence-aware text chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Target number of characters per chunk
    chunk_size: usize,

    /// Characters shared by consecutive chunks
    overlap: usize,
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `chunk_size` is 0 or if
    /// `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PaperRagError::ConfigError(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(PaperRagError::ConfigError(format!(
                "overlap ({overlap}) must be < chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into chunks carrying a copy of `metadata`.
    ///
    /// Empty text yields no chunks; text no longer than
    /// `chunk_size` yields exactly one. Each chunk's offsets are the
    /// untrimmed window `[start_char, end_char)` in characters, and
    /// the next window starts `overlap` characters before the
    /// previous end (always at least one character further on).
    pub fn chunk(&self, text: &str, metadata: &ChunkMetadata) -> Vec<Chunk> {
        // Byte offset of every character; index n maps to text.len()
        let offsets: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        let n = offsets.len();
        let byte_at = |char_idx: usize| offsets.get(char_idx).copied().unwrap_or(text.len());

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < n {
            let mut end = start + self.chunk_size;

            if end < n {
                let search_start = end.saturating_sub(BOUNDARY_SEARCH).max(start);
                let search_end = (end + BOUNDARY_SEARCH).min(n);
                let window = &text[byte_at(search_start)..byte_at(search_end)];

                if let Some(last) = SENTENCE_END.find_iter(window).last() {
                    end = search_start + window[..last.end()].chars().count();
                }
            }

            let end = end.min(n);
            let piece = text[byte_at(start)..byte_at(end)].trim();

            if !piece.is_empty() {
                chunks.push(Chunk {
                    text: piece.to_string(),
                    start_char: start,
                    end_char: end,
                    metadata: metadata.clone(),
                });
            }

            if end == n {
                break;
            }

            start = end.saturating_sub(self.overlap).max(start + 1);
        }

        chunks
    }
}
