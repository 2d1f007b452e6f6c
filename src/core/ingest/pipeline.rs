//! Processing pipeline orchestration.
//!
//! Coordinates the per-paper workflow:
//! 1. Extract raw text
//! 2. Clean it
//! 3. Chunk it
//!
//! A paper whose text cannot be extracted is skipped with a warning;
//! it never stops the batch.

use std::sync::Arc;
use std::time::Instant;

use crate::core::ingest::{clean, Chunker};
use crate::core::source::TextExtractor;
use crate::core::types::{Chunk, Document, DocumentChunkCount, ProcessStats};

/// Orchestrates extraction, cleaning and chunking
pub struct ProcessingPipeline {
    extractor: Arc<dyn TextExtractor>,
    chunker: Chunker,
}

impl ProcessingPipeline {
    pub fn new(extractor: Arc<dyn TextExtractor>, chunker: Chunker) -> Self {
        Self { extractor, chunker }
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Process a batch of papers and return chunks + stats
    pub async fn process(&self, documents: &[Document]) -> (Vec<Chunk>, ProcessStats) {
        let start = Instant::now();
        tracing::info!("Processing {} papers", documents.len());

        let mut all_chunks = Vec::new();
        let mut stats = ProcessStats::default();

        for (idx, doc) in documents.iter().enumerate() {
            tracing::debug!("[{}/{}] {}", idx + 1, documents.len(), doc.title);

            let chunks = self.process_document(doc).await;
            if chunks.is_empty() {
                tracing::warn!("Skipping {} ({}): no text extracted", doc.arxiv_id, doc.title);
                stats.papers_skipped += 1;
                continue;
            }

            tracing::info!("Processed {}: {} chunks", doc.title, chunks.len());
            stats.papers_processed += 1;
            stats.per_document.push(DocumentChunkCount {
                arxiv_id: doc.arxiv_id.clone(),
                title: doc.title.clone(),
                chunks: chunks.len(),
            });
            all_chunks.extend(chunks);
        }

        stats.chunks_created = all_chunks.len();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Processing complete: {} papers processed, {} skipped, \
             {} chunks created in {}ms",
            stats.papers_processed,
            stats.papers_skipped,
            stats.chunks_created,
            stats.duration_ms
        );

        (all_chunks, stats)
    }

    /// Extract, clean and chunk one paper
    pub async fn process_document(&self, doc: &Document) -> Vec<Chunk> {
        let raw = self.extractor.extract(doc).await;
        let text = clean(&raw);
        if text.is_empty() {
            return Vec::new();
        }
        self.chunker.chunk(&text, &doc.chunk_metadata())
    }
}
