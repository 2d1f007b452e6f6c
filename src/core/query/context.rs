//! Prompt assembly from retrieved chunks.
//!
//! Both functions are pure: chunks are rendered exactly once each,
//! in the order given, with no deduplication.

use crate::core::types::RetrievedChunk;

const BLOCK_SEPARATOR: &str = "\n---\n";

/// Render chunks as attributed source blocks
///
/// Each block is `[Source {n}: {title} ({arxiv_id})]\n{text}\n`, where `n`
/// is the 1-based position in `chunks`, not the stored retrieval rank.
pub fn build_context(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "[Source {}: {} ({})]\n{}\n",
                i + 1,
                c.title(),
                c.document_id(),
                c.text()
            )
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Build the full question-answering prompt
pub fn build_prompt(query: &str, chunks: &[RetrievedChunk]) -> String {
    let context = build_context(chunks);
    format!(
        "You are a helpful research assistant. Answer the question based on the provided context from research papers.

Context from research papers:
{context}

Question: {query}

Instructions:
- Answer based on the context provided above
- If the context doesn't contain enough information, say so
- Cite which source(s) you used (by source number)
- Be precise and scientific in your answer

Answer:"
    )
}
