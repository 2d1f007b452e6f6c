//! Embedding and index upsert for processed chunks.
//!
//! Chunks are embedded in batches of `batch_size` and written with
//! ids `chunk_{n}`. Numbering continues from the index's current
//! size, so indexing a second batch appends rather than overwriting
//! the first one.

use std::sync::Arc;
use std::time::Instant;

use crate::core::embedding::Embedder;
use crate::core::error::{PaperRagError, Result};
use crate::core::index::{chunk_id, IndexMetadata, IndexRecord, VectorIndex};
use crate::core::types::{Chunk, IndexStats};

pub struct IndexingPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    batch_size: usize,
}

impl IndexingPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>, batch_size: usize) -> Self {
        Self {
            embedder,
            index,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed `chunks` and upsert them into the index
    pub async fn index_chunks(&self, chunks: &[Chunk]) -> Result<IndexStats> {
        let start = Instant::now();
        let first_id = self.index.count().await?;

        tracing::info!(
            "Indexing {} chunks into {} (starting at {})",
            chunks.len(),
            self.index.name(),
            chunk_id(first_id)
        );

        let mut next_id = first_id;
        for (batch_no, batch) in chunks.chunks(self.batch_size).enumerate() {
            let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
            let embeddings = self.embedder.embed(&texts).await.map_err(|e| {
                tracing::error!(batch = batch_no, error = %e, "embedding failed");
                e
            })?;

            if embeddings.len() != batch.len() {
                return Err(PaperRagError::EmbeddingFailed {
                    provider: self.embedder.name().to_string(),
                    message: format!(
                        "expected {} vectors, got {}",
                        batch.len(),
                        embeddings.len()
                    ),
                });
            }

            let records: Vec<IndexRecord> = batch
                .iter()
                .zip(embeddings)
                .map(|(chunk, embedding)| {
                    let record = IndexRecord {
                        id: chunk_id(next_id),
                        embedding,
                        document: chunk.text.clone(),
                        metadata: IndexMetadata::from_chunk(chunk),
                    };
                    next_id += 1;
                    record
                })
                .collect();

            self.index.upsert(&records).await?;
            tracing::debug!("Indexed batch {} ({} chunks)", batch_no, records.len());
        }

        let stats = IndexStats {
            chunks_indexed: chunks.len(),
            first_id,
            total_in_index: self.index.count().await?,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Indexing complete: {} chunks in {}ms ({} entries in index)",
            stats.chunks_indexed,
            stats.duration_ms,
            stats.total_in_index
        );

        Ok(stats)
    }
}
