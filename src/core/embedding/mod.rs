//! Text embedding backends.
//!
//! An [`Embedder`] turns a batch of texts into vectors, preserving
//! order. Two backends are provided:
//!
//! - **hashing**: deterministic feature hashing, runs offline
//! - **openai**: any OpenAI-compatible `/embeddings` endpoint

pub mod hashing;
pub mod openai;

use crate::core::error::{PaperRagError, Result};
use async_trait::async_trait;

pub use hashing::HashingEmbedder;
pub use openai::OpenAiEmbedder;

/// Generates vector embeddings from text.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Backend name used in logs and errors
    fn name(&self) -> &str;

    /// Length of the vectors this embedder produces
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts; the output has one vector per input,
    /// in the same order
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text (a query, usually)
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| PaperRagError::EmbeddingFailed {
                provider: self.name().to_string(),
                message: "backend returned no vector".to_string(),
            })
    }
}
