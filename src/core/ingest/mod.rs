//! Document ingestion.
//!
//! Turns downloaded papers into indexed chunks:
//!
//! - **cleaner**: normalizes extracted text
//! - **chunker**: sentence-aware overlapping windows (character based)
//! - **pipeline**: extract → clean → chunk over a batch of papers
//! - **indexer**: embed chunks and upsert them into a vector index
//! - **store**: `chunks.json` / `papers.json` persistence

pub mod chunker;
pub mod cleaner;
pub mod indexer;
pub mod pipeline;
pub mod store;

pub use chunker::Chunker;
pub use cleaner::clean;
pub use indexer::IndexingPipeline;
pub use pipeline::ProcessingPipeline;
