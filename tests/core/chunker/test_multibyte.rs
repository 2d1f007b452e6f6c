// UTF-8 safety tests: multibyte character handling
//
// Offsets are character based, so slicing the source text by
// `start_char..end_char` must reproduce each chunk.

use crate::common::sample_metadata;
use paper_rag::core::ingest::{clean, Chunker};

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

fn assert_offsets_match(text: &str, chunker: &Chunker) {
    let chunks = chunker.chunk(text, &sample_metadata());
    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert_eq!(chunk.text, char_slice(text, chunk.start_char, chunk.end_char).trim());
    }
}

#[test]
fn test_chunk_greek_physics_text() {
    let text = clean(&"Die Wellenfunktion ψ erfüllt ∂ψ/∂t = -iHψ. Für α ≈ β gilt γ ≤ δ. ".repeat(40));
    assert_offsets_match(&text, &Chunker::new(100, 20).unwrap());
}

#[test]
fn test_chunk_chinese_text() {
    let text = "量子纠缠是一种物理现象。 ".repeat(200);
    assert_offsets_match(text.trim(), &Chunker::new(50, 10).unwrap());
}

#[test]
fn test_chunk_emoji_text() {
    let text = "Qubits 🧪 decohere fast! Photons 🔬 travel far. ".repeat(60);
    assert_offsets_match(text.trim(), &Chunker::new(64, 16).unwrap());
}

#[test]
fn test_chunk_mixed_scripts_counts_characters() {
    // 3 bytes per character; 300 characters
    let text = "é".repeat(100) + &"中".repeat(100) + &"ж".repeat(100);
    let chunks = Chunker::new(100, 0).unwrap().chunk(&text, &sample_metadata());

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text, "é".repeat(100));
    assert_eq!(chunks[1].text, "中".repeat(100));
    assert_eq!(chunks[2].text, "ж".repeat(100));
    assert_eq!(chunks[2].end_char, 300);
}

#[test]
fn test_cleaner_keeps_greek_and_drops_symbols() {
    assert_eq!(clean("Energy ≈ ħω → 5 ☃ eV"), "Energy ≈ ħω 5 eV");
}
