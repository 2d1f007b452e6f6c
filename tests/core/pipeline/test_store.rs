// chunks.json / papers.json persistence

use crate::common::{sample_metadata, TestPapers};
use paper_rag::core::error::PaperRagError;
use paper_rag::core::ingest::{store, Chunker};
use tempfile::TempDir;

#[test]
fn test_chunk_file_is_flat_records() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("processed").join("chunks.json");
    let chunks = Chunker::new(40, 5)
        .unwrap()
        .chunk("First sentence here. Second sentence follows it. Third one ends.", &sample_metadata());

    store::save_chunks(&path, &chunks).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &json[0];
    for field in [
        "text",
        "start_char",
        "end_char",
        "arxiv_id",
        "title",
        "authors",
        "published",
        "categories",
    ] {
        assert!(first.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(store::load_chunks(&path).unwrap(), chunks);
}

#[test]
fn test_record_missing_field_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("chunks.json");
    std::fs::write(
        &path,
        r#"[{"text": "orphan", "start_char": 0, "end_char": 6, "arxiv_id": "x"}]"#,
    )
    .unwrap();

    let err = store::load_chunks(&path).unwrap_err();
    assert!(matches!(err, PaperRagError::ChunkFileError(_)));
}

#[test]
fn test_missing_chunk_file_is_error() {
    let temp = TempDir::new().unwrap();
    let err = store::load_chunks(&temp.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_manifest_round_trip_keeps_paths() {
    let papers = TestPapers::small();
    let path = papers.path().join("papers.json");

    store::save_manifest(&path, &papers.documents).unwrap();
    let loaded = store::load_manifest(&path).unwrap();

    assert_eq!(loaded, papers.documents);
    assert!(loaded.iter().all(|d| d.pdf_path.exists()));
}
