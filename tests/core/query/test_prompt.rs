// Prompt assembly and the interactive loop over a canned index

use crate::common::sample_metadata;
use paper_rag::core::embedding::HashingEmbedder;
use paper_rag::core::generation::{PlaceholderGenerator, PLACEHOLDER_ANSWER};
use paper_rag::core::index::{IndexMetadata, IndexRecord, MemoryIndex, VectorIndex};
use paper_rag::core::query::{build_context, build_prompt, QaPipeline, Retriever};
use paper_rag::core::types::{Chunk, RetrievedChunk};
use std::io::Cursor;
use std::sync::Arc;

fn retrieved(rank: usize, title: &str, id: &str, text: &str) -> RetrievedChunk {
    let mut metadata = sample_metadata();
    metadata.title = title.to_string();
    metadata.arxiv_id = id.to_string();
    RetrievedChunk {
        rank,
        distance: 0.1 * rank as f32,
        chunk: Chunk {
            text: text.to_string(),
            start_char: 0,
            end_char: text.chars().count(),
            metadata,
        },
    }
}

#[test]
fn test_prompt_matches_template_exactly() {
    let sources = vec![
        retrieved(1, "Paper A", "2301.00001v1", "Alpha text."),
        retrieved(2, "Paper B", "2302.00002v1", "Beta text."),
    ];

    let expected = "You are a helpful research assistant. Answer the question based on the provided context from research papers.\n\
\n\
Context from research papers:\n\
[Source 1: Paper A (2301.00001v1)]\n\
Alpha text.\n\
\n\
---\n\
[Source 2: Paper B (2302.00002v1)]\n\
Beta text.\n\
\n\
\n\
Question: What is alpha?\n\
\n\
Instructions:\n\
- Answer based on the context provided above\n\
- If the context doesn't contain enough information, say so\n\
- Cite which source(s) you used (by source number)\n\
- Be precise and scientific in your answer\n\
\n\
Answer:";

    assert_eq!(build_prompt("What is alpha?", &sources), expected);
}

#[test]
fn test_empty_context_still_builds_prompt() {
    assert_eq!(build_context(&[]), "");
    let prompt = build_prompt("Anything?", &[]);
    assert!(prompt.contains("Context from research papers:\n\n\nQuestion: Anything?"));
}

#[test]
fn test_duplicate_chunks_are_kept() {
    let source = retrieved(1, "Paper A", "2301.00001v1", "Same text.");
    let context = build_context(&[source.clone(), source]);
    assert_eq!(context.matches("Same text.").count(), 2);
}

#[tokio::test]
async fn test_interactive_session_transcript() {
    let embedder = Arc::new(HashingEmbedder::new(64));
    let index = Arc::new(MemoryIndex::new());
    let text = "Superconducting qubits lose coherence.";
    let chunk = Chunk {
        text: text.to_string(),
        start_char: 0,
        end_char: text.chars().count(),
        metadata: sample_metadata(),
    };
    index
        .upsert(&[IndexRecord {
            id: "chunk_0".to_string(),
            embedding: embedder.embed_text(text),
            document: text.to_string(),
            metadata: IndexMetadata::from_chunk(&chunk),
        }])
        .await
        .unwrap();

    let pipeline = QaPipeline::new(
        Retriever::new(embedder, index),
        Arc::new(PlaceholderGenerator),
        3,
    );

    let mut output = Vec::new();
    let summary = pipeline
        .interactive(Cursor::new("Why do qubits decohere?\nexit\n"), &mut output, None, true)
        .await
        .unwrap();
    let transcript = String::from_utf8(output).unwrap();

    assert_eq!(summary.answered, 1);
    assert!(transcript.contains("Ready for questions!"));
    assert!(transcript.contains("Query: Why do qubits decohere?"));
    assert!(transcript.contains("Retrieved 1 relevant chunks"));
    assert!(transcript.contains("1. Sample Paper... (distance: "));
    assert!(transcript.contains("PROMPT:"));
    assert!(transcript.contains(PLACEHOLDER_ANSWER));
}
