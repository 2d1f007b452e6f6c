//! paper-rag - Question answering over research papers
//!
//! A small retrieval-augmented generation pipeline: papers are
//! fetched from arXiv, their text is cleaned and split into
//! overlapping sentence-aware chunks, the chunks are embedded into a
//! vector index, and questions are answered from the most relevant
//! chunks with source attribution.
//!
//! # Architecture
//!
//! - **core**: Domain logic (interface-agnostic)
//!   - config, error, types, xdg
//!   - source (arXiv, manifest, text extraction)
//!   - ingest (cleaner, chunker, processing and indexing pipelines)
//!   - embedding, index, generation (pluggable backends)
//!   - query (retriever, prompt assembly, orchestrator)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (character offsets, never panics)
//! - Sentence-boundary snapping within a 100 character window
//! - Offline defaults: hashing embedder, on-disk index, placeholder answers
//! - Chroma and OpenAI-compatible backends when configured

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{PaperRagError, Result};
pub use core::services::Services;
pub use core::types::*;
