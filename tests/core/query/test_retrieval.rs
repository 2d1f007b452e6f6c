// Retrieval over the memory index and through a misbehaving index

use crate::common::sample_metadata;
use async_trait::async_trait;
use paper_rag::core::embedding::HashingEmbedder;
use paper_rag::core::error::{PaperRagError, Result};
use paper_rag::core::index::{
    IndexMetadata, IndexQueryResponse, IndexRecord, MemoryIndex, VectorIndex,
};
use paper_rag::core::query::Retriever;
use paper_rag::core::types::Chunk;
use std::sync::Arc;

fn record(id: &str, text: &str, embedder: &HashingEmbedder) -> IndexRecord {
    let chunk = Chunk {
        text: text.to_string(),
        start_char: 0,
        end_char: text.chars().count(),
        metadata: sample_metadata(),
    };
    IndexRecord {
        id: id.to_string(),
        embedding: embedder.embed_text(text),
        document: text.to_string(),
        metadata: IndexMetadata::from_chunk(&chunk),
    }
}

#[tokio::test]
async fn test_k_larger_than_index_returns_what_exists() {
    let embedder = Arc::new(HashingEmbedder::new(64));
    let index = Arc::new(MemoryIndex::new());
    index
        .upsert(&[record("chunk_0", "Qubits decohere quickly.", &embedder)])
        .await
        .unwrap();

    let retriever = Retriever::new(embedder, index);
    let results = retriever.retrieve("qubits", 3).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rank, 1);
    assert!(results[0].distance >= 0.0);
    // Metadata survives the flat index representation
    assert_eq!(results[0].chunk.metadata, sample_metadata());
}

#[tokio::test]
async fn test_empty_index_returns_no_results() {
    let retriever = Retriever::new(
        Arc::new(HashingEmbedder::new(64)),
        Arc::new(MemoryIndex::new()),
    );
    assert!(retriever.retrieve("anything", 3).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_queries_rejected() {
    let retriever = Retriever::new(
        Arc::new(HashingEmbedder::new(64)),
        Arc::new(MemoryIndex::new()),
    );

    let err = retriever.retrieve("  \n ", 3).await.unwrap_err();
    assert!(matches!(err, PaperRagError::InvalidQuery(_)));

    let err = retriever.retrieve("qubits", 0).await.unwrap_err();
    assert!(matches!(err, PaperRagError::InvalidQuery(_)));
}

/// Index that returns one document too few
struct ShortIndex;

#[async_trait]
impl VectorIndex for ShortIndex {
    fn name(&self) -> &str {
        "short"
    }

    async fn upsert(&self, _records: &[IndexRecord]) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _embedding: &[f32], _k: usize) -> Result<IndexQueryResponse> {
        Ok(IndexQueryResponse {
            ids: vec!["chunk_0".to_string(), "chunk_1".to_string()],
            documents: vec![Some("only one".to_string())],
            metadatas: vec![None, None],
            distances: vec![0.1, 0.2],
        })
    }

    async fn count(&self) -> Result<usize> {
        Ok(2)
    }
}

#[tokio::test]
async fn test_misaligned_index_response_is_rejected() {
    let retriever = Retriever::new(Arc::new(HashingEmbedder::new(64)), Arc::new(ShortIndex));
    let err = retriever.retrieve("qubits", 2).await.unwrap_err();
    assert!(matches!(err, PaperRagError::IndexShapeMismatch { .. }));
}
