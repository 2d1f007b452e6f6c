//! Core domain logic (interface-agnostic)
//!
//! Everything here is independent of the command-line front end.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **source**: Paper search, download and text extraction
//! - **ingest**: Cleaning, chunking and indexing pipelines
//! - **embedding**: Text embedding backends
//! - **index**: Vector index backends
//! - **generation**: Answer generation backends
//! - **query**: Retrieval, prompt assembly and the QA loop
//! - **services**: Unified service container

pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingest;
pub mod query;
pub mod services;
pub mod source;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{PaperRagError, Result};
pub use services::Services;
