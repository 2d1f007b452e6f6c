//! Property tests for chunk windows over cleaned text.

use crate::common::sample_metadata;
use paper_rag::core::ingest::chunker::BOUNDARY_SEARCH;
use paper_rag::core::ingest::{clean, Chunker};
use proptest::prelude::*;

/// Sentence-like text: words joined by spaces and sentence punctuation,
/// normalized the way the processing pipeline normalizes it.
fn arb_cleaned_text() -> impl Strategy<Value = String> {
    let word = "[a-zA-Z0-9éψ中]{1,12}";
    let sep = prop_oneof![
        4 => Just(" "),
        1 => Just(". "),
        1 => Just("! "),
        1 => Just("? "),
        1 => Just(", "),
        1 => Just("\n\n"),
    ];
    proptest::collection::vec((word, sep), 1..400)
        .prop_map(|parts| {
            parts
                .into_iter()
                .map(|(w, s)| format!("{w}{s}"))
                .collect::<String>()
        })
        .prop_map(|raw| clean(&raw))
        .prop_filter("non-empty text", |t| !t.is_empty())
}

fn arb_chunker() -> impl Strategy<Value = Chunker> {
    (2usize..300)
        .prop_flat_map(|size| (Just(size), 0..size))
        .prop_map(|(size, overlap)| Chunker::new(size, overlap).unwrap())
}

/// Chunkers whose window can never snap back past the overlap
fn arb_progressing_chunker() -> impl Strategy<Value = Chunker> {
    (0usize..200)
        .prop_flat_map(|overlap| (overlap + BOUNDARY_SEARCH + 1..overlap + 600, Just(overlap)))
        .prop_map(|(size, overlap)| Chunker::new(size, overlap).unwrap())
}

/// Upper bound on the chunk count: every step advances by at least
/// `chunk_size - overlap - BOUNDARY_SEARCH` characters
fn max_chunks(n: usize, chunker: &Chunker) -> usize {
    let step = chunker.chunk_size() - chunker.overlap() - BOUNDARY_SEARCH;
    n.div_ceil(step) + 1
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

mod prop_chunk_windows {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn windows_are_valid_and_match_text(text in arb_cleaned_text(), chunker in arb_chunker()) {
            let n = text.chars().count();
            let chunks = chunker.chunk(&text, &sample_metadata());

            prop_assert!(!chunks.is_empty());
            for chunk in &chunks {
                prop_assert!(chunk.start_char < chunk.end_char);
                prop_assert!(chunk.end_char <= n);
                prop_assert!(!chunk.text.is_empty());
                let window = char_slice(&text, chunk.start_char, chunk.end_char);
                prop_assert_eq!(chunk.text.as_str(), window.trim());
                prop_assert_eq!(&chunk.metadata, &sample_metadata());
            }
        }

        #[test]
        fn windows_cover_text_and_always_advance(text in arb_cleaned_text(), chunker in arb_chunker()) {
            let n = text.chars().count();
            let chunks = chunker.chunk(&text, &sample_metadata());

            prop_assert_eq!(chunks[0].start_char, 0);
            prop_assert_eq!(chunks[chunks.len() - 1].end_char, n);
            for pair in chunks.windows(2) {
                prop_assert!(pair[1].start_char > pair[0].start_char);
                prop_assert!(pair[1].start_char <= pair[0].end_char);
            }
        }

        #[test]
        fn window_span_is_bounded(text in arb_cleaned_text(), chunker in arb_chunker()) {
            for chunk in chunker.chunk(&text, &sample_metadata()) {
                prop_assert!(chunk.span() <= chunker.chunk_size() + BOUNDARY_SEARCH);
            }
        }

        #[test]
        fn chunk_count_is_bounded(text in arb_cleaned_text(), chunker in arb_progressing_chunker()) {
            let n = text.chars().count();
            let chunks = chunker.chunk(&text, &sample_metadata());

            prop_assert!(chunks.len() <= max_chunks(n, &chunker));
        }

        #[test]
        fn chunking_is_deterministic(text in arb_cleaned_text(), chunker in arb_chunker()) {
            let first = chunker.chunk(&text, &sample_metadata());
            let second = chunker.chunk(&text, &sample_metadata());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn short_text_is_one_chunk(text in arb_cleaned_text()) {
            let n = text.chars().count();
            let chunker = Chunker::new(n, 0).unwrap();
            let chunks = chunker.chunk(&text, &sample_metadata());

            prop_assert_eq!(chunks.len(), 1);
            prop_assert_eq!(chunks[0].text.as_str(), text.as_str());
        }
    }
}

#[test]
fn test_empty_text_has_no_chunks() {
    let chunker = Chunker::new(100, 10).unwrap();
    assert!(chunker.chunk("", &sample_metadata()).is_empty());
}

#[test]
fn test_chunk_count_near_nominal_at_defaults() {
    let raw: String = (0..400)
        .map(|i| format!("Sentence number {i} discusses quantum decoherence in some detail. "))
        .collect();
    let text = clean(&raw);
    let n = text.chars().count();

    let chunker = Chunker::new(1000, 200).unwrap();
    let chunks = chunker.chunk(&text, &sample_metadata());

    assert!(chunks.len() <= max_chunks(n, &chunker));
    // Each step advances at most chunk_size + BOUNDARY_SEARCH - overlap characters
    let max_step = 1000 + BOUNDARY_SEARCH - 200;
    assert!(chunks.len() >= (n - 1000 - BOUNDARY_SEARCH).div_ceil(max_step) + 1);
    let nominal = n.div_ceil(1000 - 200);
    assert!(chunks.len().abs_diff(nominal) <= 3, "{} chunks vs nominal {nominal}", chunks.len());
}

#[test]
fn test_invalid_parameters_rejected() {
    assert!(Chunker::new(0, 0).is_err());
    assert!(Chunker::new(100, 100).is_err());
    assert!(Chunker::new(100, 150).is_err());
}
