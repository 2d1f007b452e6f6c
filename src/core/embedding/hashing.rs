//! Local embeddings using feature hashing.
//!
//! Each lowercase token is hashed into one of `dimensions` buckets;
//! the term-frequency vector is then L2-normalized. No vocabulary is
//! kept, so the same text always maps to the same vector no matter
//! what else has been embedded. Buckets come from SHA-256 so vectors
//! persisted in an index snapshot stay valid across builds.

use super::Embedder;
use crate::core::error::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Deterministic, offline embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, token: &str) -> usize {
        let digest = Sha256::digest(token.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        (u64::from_le_bytes(prefix) % self.dimensions as u64) as usize
    }

    /// Embed one text synchronously
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| !t.is_empty())
        {
            vector[self.bucket(&token.to_lowercase())] += 1.0;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }

        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        tracing::debug!(provider = "hashing", batch_size = texts.len(), "embedding batch");
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
