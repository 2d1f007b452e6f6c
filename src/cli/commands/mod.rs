//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command. The ingestion commands also expose their
//! core step as a function so `run` can chain them.

pub mod ask;
pub mod chat;
pub mod completions;
pub mod config;
pub mod download;
pub mod index;
pub mod process;
pub mod run;

// Re-export argument types for use in mod.rs
pub use ask::AskArgs;
pub use chat::ChatArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use download::DownloadArgs;
pub use index::IndexArgs;
pub use process::ProcessArgs;
pub use run::RunArgs;

use crate::core::error::PaperRagError;

/// Append `hint` to errors caused by a missing or unreadable stage file
pub(crate) fn with_hint(err: PaperRagError, hint: &str) -> Box<dyn std::error::Error> {
    match err {
        PaperRagError::ChunkFileError(_) => format!("{err}. {hint}").into(),
        other => other.into(),
    }
}
