//! Similarity retrieval over the vector index.
//!
//! Embeds the question, asks the index for the nearest chunks and
//! converts the index's columnar response into ranked
//! [`RetrievedChunk`]s. A response whose columns disagree, or that
//! is missing a document, metadata or distance, is rejected as a
//! whole: a silently shortened list would hide a broken index.

use std::sync::Arc;

use crate::core::embedding::Embedder;
use crate::core::error::{PaperRagError, Result};
use crate::core::index::{IndexMetadata, IndexQueryResponse, VectorIndex};
use crate::core::types::RetrievedChunk;

pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Return up to `k` chunks for `query`, most relevant first
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PaperRagError::InvalidQuery(
                "query must not be empty".to_string(),
            ));
        }
        if k == 0 {
            return Err(PaperRagError::InvalidQuery("k must be at least 1".to_string()));
        }

        let embedding = self.embedder.embed_one(query).await?;
        let response = self.index.query(&embedding, k).await?;
        let results = normalize_response(response, k)?;

        tracing::debug!(k, returned = results.len(), "retrieved chunks");
        Ok(results)
    }
}

fn mismatch(position: usize, message: impl Into<String>) -> PaperRagError {
    PaperRagError::IndexShapeMismatch {
        position,
        message: message.into(),
    }
}

/// Validate a columnar index response and turn it into ranked chunks
///
/// Negative distances are clamped to zero. Results are stably sorted
/// by ascending distance, cut to `k` and ranked from 1.
pub fn normalize_response(response: IndexQueryResponse, k: usize) -> Result<Vec<RetrievedChunk>> {
    let n = response.ids.len();
    for (column, len) in [
        ("documents", response.documents.len()),
        ("metadatas", response.metadatas.len()),
        ("distances", response.distances.len()),
    ] {
        if len != n {
            return Err(mismatch(
                len.min(n),
                format!("{n} ids but {len} {column}"),
            ));
        }
    }

    let mut hits = Vec::with_capacity(n);
    let rows = response
        .documents
        .into_iter()
        .zip(response.metadatas)
        .zip(response.distances);

    for (position, ((document, metadata), distance)) in rows.enumerate() {
        let text = document.ok_or_else(|| mismatch(position, "missing document"))?;
        let metadata = metadata.ok_or_else(|| mismatch(position, "missing metadata"))?;
        if distance.is_nan() {
            return Err(mismatch(position, "distance is NaN"));
        }

        let metadata: IndexMetadata = serde_json::from_value(metadata)
            .map_err(|e| mismatch(position, format!("malformed metadata: {e}")))?;
        let chunk = metadata
            .to_chunk(text)
            .map_err(|e| mismatch(position, e.to_string()))?;

        hits.push((distance.max(0.0), chunk));
    }

    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits.truncate(k);

    Ok(hits
        .into_iter()
        .enumerate()
        .map(|(i, (distance, chunk))| RetrievedChunk {
            rank: i + 1,
            distance,
            chunk,
        })
        .collect())
}
