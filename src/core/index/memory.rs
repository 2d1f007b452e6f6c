//! In-process vector index with cosine distance.
//!
//! Records are held in insertion order behind a `tokio::sync::RwLock`.
//! When opened with a snapshot path, every upsert rewrites the
//! snapshot as JSON so a later process (e.g. `ask` after `index`)
//! sees the same entries.

use super::{IndexQueryResponse, IndexRecord, VectorIndex};
use crate::core::error::{PaperRagError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

const BACKEND: &str = "memory";

#[derive(Debug, Default)]
struct Entries {
    records: Vec<IndexRecord>,
    /// id -> position in `records`
    positions: HashMap<String, usize>,
}

impl Entries {
    fn from_records(records: Vec<IndexRecord>) -> Self {
        let mut entries = Self::default();
        for record in records {
            entries.insert(record);
        }
        entries
    }

    fn insert(&mut self, record: IndexRecord) {
        match self.positions.get(&record.id) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.positions.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }
}

/// Brute-force cosine index, optionally persisted to a JSON file
#[derive(Debug, Default)]
pub struct MemoryIndex {
    entries: RwLock<Entries>,
    snapshot: Option<PathBuf>,
}

impl MemoryIndex {
    /// Create an empty, unpersisted index
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an index backed by `path`, loading it if the file exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let records: Vec<IndexRecord> = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|e| PaperRagError::IndexError {
                backend: BACKEND.to_string(),
                message: format!("corrupt snapshot {}: {e}", path.display()),
            })?
        } else {
            Vec::new()
        };

        tracing::debug!("Opened memory index {:?} ({} entries)", path, records.len());

        Ok(Self {
            entries: RwLock::new(Entries::from_records(records)),
            snapshot: Some(path),
        })
    }

    async fn persist(&self, entries: &Entries) -> Result<()> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string(&entries.records)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Cosine similarity; 0.0 if either vector has zero magnitude
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn upsert(&self, records: &[IndexRecord]) -> Result<()> {
        let mut entries = self.entries.write().await;
        for record in records {
            entries.insert(record.clone());
        }
        self.persist(&entries).await?;

        tracing::debug!(
            backend = BACKEND,
            count = records.len(),
            total = entries.records.len(),
            "upserted records"
        );
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<IndexQueryResponse> {
        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &IndexRecord)> = entries
            .records
            .iter()
            .map(|r| (1.0 - cosine_similarity(&r.embedding, embedding), r))
            .collect();

        // Stable: ties keep insertion order
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        let mut response = IndexQueryResponse::default();
        for (distance, record) in scored {
            response.ids.push(record.id.clone());
            response.documents.push(Some(record.document.clone()));
            response
                .metadatas
                .push(Some(serde_json::to_value(&record.metadata)?));
            response.distances.push(distance);
        }

        Ok(response)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.records.len())
    }
}
