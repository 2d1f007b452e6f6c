//! Chroma vector index over its REST API.
//!
//! Talks to a running Chroma server directly with `reqwest`. The
//! collection is resolved (created if missing) on first use and its
//! id cached for the life of the client.

use super::{IndexQueryResponse, IndexRecord, VectorIndex};
use crate::core::error::{PaperRagError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::OnceCell;

const BACKEND: &str = "chroma";
const TENANT: &str = "default_tenant";
const DATABASE: &str = "default_database";

#[derive(Debug, Deserialize)]
struct CollectionInfo {
    id: String,
}

/// Raw `/query` response: one row per query embedding
#[derive(Debug, Deserialize)]
struct ChromaQueryResult {
    ids: Vec<Vec<String>>,
    documents: Option<Vec<Vec<Option<String>>>>,
    metadatas: Option<Vec<Vec<Option<Value>>>>,
    distances: Option<Vec<Vec<Option<f32>>>>,
}

impl ChromaQueryResult {
    /// Take the first row; missing columns become gaps the
    /// retriever will reject
    fn into_response(self) -> IndexQueryResponse {
        let ids = self.ids.into_iter().next().unwrap_or_default();
        let documents = first_row(self.documents).unwrap_or_else(|| vec![None; ids.len()]);
        let metadatas = first_row(self.metadatas).unwrap_or_else(|| vec![None; ids.len()]);
        let distances = first_row(self.distances)
            .unwrap_or_else(|| vec![None; ids.len()])
            .into_iter()
            .map(|d| d.unwrap_or(f32::NAN))
            .collect();

        IndexQueryResponse {
            ids,
            documents,
            metadatas,
            distances,
        }
    }
}

fn first_row<T>(column: Option<Vec<Vec<T>>>) -> Option<Vec<T>> {
    column.and_then(|rows| rows.into_iter().next())
}

/// Vector index stored in a Chroma collection
pub struct ChromaIndex {
    http: Client,
    base_url: String,
    collection: String,
    collection_id: OnceCell<String>,
}

impl ChromaIndex {
    pub fn new(base_url: &str, collection: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            collection_id: OnceCell::new(),
        })
    }

    fn failure(message: impl Into<String>) -> PaperRagError {
        PaperRagError::IndexError {
            backend: BACKEND.to_string(),
            message: message.into(),
        }
    }

    /// Check the server is reachable
    pub async fn heartbeat(&self) -> Result<()> {
        let resp = self
            .http
            .get(format!("{}/api/v1/heartbeat", self.base_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::failure(format!(
                "server at {} unavailable ({})",
                self.base_url,
                resp.status()
            )));
        }
        Ok(())
    }

    async fn collection_id(&self) -> Result<&str> {
        let id = self
            .collection_id
            .get_or_try_init(|| async {
                self.heartbeat().await?;
                let resp = self
                    .http
                    .post(format!(
                        "{}/api/v1/tenants/{TENANT}/databases/{DATABASE}/collections",
                        self.base_url
                    ))
                    .json(&json!({
                        "name": self.collection,
                        "get_or_create": true,
                        "metadata": {"hnsw:space": "cosine"},
                    }))
                    .send()
                    .await?;

                let status = resp.status();
                let text = resp.text().await?;
                if !status.is_success() {
                    tracing::error!(name = %self.collection, status = %status, "collection get_or_create failed");
                    return Err(Self::failure(format!(
                        "get_or_create '{}' failed ({status}): {text}",
                        self.collection
                    )));
                }

                let info: CollectionInfo = serde_json::from_str(&text)
                    .map_err(|e| Self::failure(format!("invalid collection response: {e}")))?;
                tracing::info!(name = %self.collection, id = %info.id, "Using Chroma collection");
                Ok::<String, PaperRagError>(info.id)
            })
            .await?;

        Ok(id.as_str())
    }
}

#[async_trait]
impl VectorIndex for ChromaIndex {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn upsert(&self, records: &[IndexRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let id = self.collection_id().await?;
        let mut metadatas = Vec::with_capacity(records.len());
        for record in records {
            metadatas.push(serde_json::to_value(&record.metadata)?);
        }

        let body = json!({
            "ids": records.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            "embeddings": records.iter().map(|r| &r.embedding).collect::<Vec<_>>(),
            "documents": records.iter().map(|r| r.document.as_str()).collect::<Vec<_>>(),
            "metadatas": metadatas,
        });

        let resp = self
            .http
            .post(format!("{}/api/v1/collections/{id}/upsert", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %text, "Chroma upsert failed");
            return Err(Self::failure(format!("upsert failed ({status}): {text}")));
        }

        tracing::debug!(collection = %self.collection, count = records.len(), "Upserted records");
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<IndexQueryResponse> {
        // Older Chroma servers reject n_results larger than the collection
        let available = self.count().await?;
        let n_results = k.min(available);
        if n_results == 0 {
            return Ok(IndexQueryResponse::default());
        }

        let id = self.collection_id().await?;
        let body = json!({
            "query_embeddings": [embedding],
            "n_results": n_results,
            "include": ["documents", "metadatas", "distances"],
        });

        tracing::debug!(collection = %self.collection, n_results, "Querying collection");
        let resp = self
            .http
            .post(format!("{}/api/v1/collections/{id}/query", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %text, "Chroma query failed");
            return Err(Self::failure(format!("query failed ({status}): {text}")));
        }

        let result: ChromaQueryResult = resp
            .json()
            .await
            .map_err(|e| Self::failure(format!("invalid query response: {e}")))?;
        Ok(result.into_response())
    }

    async fn count(&self) -> Result<usize> {
        let id = self.collection_id().await?;
        let resp = self
            .http
            .get(format!("{}/api/v1/collections/{id}/count", self.base_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::failure(format!("count failed ({})", resp.status())));
        }

        let count: usize = resp
            .json()
            .await
            .map_err(|e| Self::failure(format!("invalid count response: {e}")))?;
        Ok(count)
    }
}
