//! Offline document source backed by a saved `papers.json`.
//!
//! Lets `process` re-run over papers downloaded earlier without
//! touching the network. The manifest is the record of a previous
//! search, so the query text is not re-applied; only the category
//! filter and result limit are.

use super::{DocumentSource, SourceBatch};
use crate::core::error::Result;
use crate::core::ingest::store;
use async_trait::async_trait;
use std::path::PathBuf;

pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for ManifestSource {
    fn name(&self) -> &str {
        "manifest"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        category: Option<&str>,
    ) -> Result<SourceBatch> {
        tracing::debug!("Reading manifest {:?} (query '{}' not re-applied)", self.path, query);
        let all = store::load_manifest(&self.path)?;

        let mut batch = SourceBatch::default();
        for doc in all {
            if let Some(cat) = category {
                if !doc.categories.iter().any(|c| c == cat) {
                    continue;
                }
            }
            if batch.documents.len() >= max_results {
                break;
            }

            batch.stats.found += 1;
            if doc.pdf_path.exists() {
                batch.stats.already_present += 1;
                batch.documents.push(doc);
            } else {
                tracing::warn!("Missing file for {}: {:?}", doc.arxiv_id, doc.pdf_path);
                batch.stats.failed += 1;
            }
        }

        Ok(batch)
    }
}
