//! Where papers come from and how their text is read.
//!
//! - [`DocumentSource`]: finds papers and makes their files local
//!   (arXiv search + download, or a previously written manifest)
//! - [`TextExtractor`]: turns a local paper file into raw text

pub mod arxiv;
pub mod extract;
pub mod manifest;

use crate::core::error::Result;
use crate::core::types::{DownloadStats, Document};
use async_trait::async_trait;

pub use arxiv::ArxivSource;
pub use extract::FileTextExtractor;
pub use manifest::ManifestSource;

/// Documents returned by a search, with per-document outcome counts
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub documents: Vec<Document>,
    pub stats: DownloadStats,
}

/// A searchable collection of papers.
///
/// Failures fetching an individual paper are logged and counted in
/// the returned stats; only failures of the search itself are errors.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    fn name(&self) -> &str;

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        category: Option<&str>,
    ) -> Result<SourceBatch>;
}

/// Reads the raw text of a local paper.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extracted text, or an empty string if the file could not be read
    async fn extract(&self, document: &Document) -> String;
}
