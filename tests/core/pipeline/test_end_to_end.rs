// End-to-end: source → manifest → process → chunks.json → index → ask
//
// Uses fixture papers written as plain text, so no network or PDF
// converter is needed.

use crate::common::{assert_valid_stats, create_test_services, TestPapers};
use paper_rag::core::generation::PLACEHOLDER_ANSWER;
use paper_rag::core::index::VectorIndex;
use paper_rag::core::ingest::store;
use paper_rag::core::source::DocumentSource;

#[tokio::test]
async fn test_full_pipeline_over_fixture_papers() {
    let papers = TestPapers::small();
    let services = create_test_services(&papers);
    let storage = &services.config.storage;

    // Download step: record the manifest
    let batch = services.source.search("quantum", 10, None).await.unwrap();
    assert_eq!(batch.documents.len(), 3);
    store::save_manifest(&storage.manifest_path(), &batch.documents).unwrap();

    // Process step: read it back offline
    let manifest = services
        .manifest_source()
        .search("ignored", usize::MAX, None)
        .await
        .unwrap();
    assert_eq!(manifest.stats.already_present, 3);

    let pipeline = services.create_processing_pipeline(services.default_chunker().unwrap());
    let (chunks, stats) = pipeline.process(&manifest.documents).await;
    assert_valid_stats(&stats);
    assert_eq!(stats.papers_processed, 3);
    assert_eq!(stats.chunks_created, 3, "each short paper fits one chunk");

    store::save_chunks(&storage.chunks_path(), &chunks).unwrap();
    let reloaded = store::load_chunks(&storage.chunks_path()).unwrap();
    assert_eq!(reloaded, chunks);

    // Index step
    let index_stats = services
        .create_indexing_pipeline()
        .index_chunks(&reloaded)
        .await
        .unwrap();
    assert_eq!(index_stats.chunks_indexed, 3);
    assert_eq!(index_stats.first_id, 0);
    assert_eq!(index_stats.total_in_index, 3);

    // Query step: asking with a chunk's exact text ranks it first
    let surface = chunks
        .iter()
        .find(|c| c.metadata.arxiv_id == "2302.00002v2")
        .unwrap();
    let result = services
        .create_qa_pipeline()
        .ask(&surface.text, None)
        .await
        .unwrap();

    assert_eq!(result.sources.len(), 3);
    assert_eq!(result.sources[0].document_id(), "2302.00002v2");
    assert!(result.sources[0].distance < 1e-4);
    assert_eq!(
        result.sources.iter().map(|s| s.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(result
        .prompt
        .contains("[Source 1: Surface Codes for Quantum Error Correction (2302.00002v2)]"));
    assert_eq!(result.answer, PLACEHOLDER_ANSWER);
}

#[tokio::test]
async fn test_category_filter_limits_processing() {
    let papers = TestPapers::small();
    let services = create_test_services(&papers);

    let batch = services
        .source
        .search("galaxies", 10, Some("astro-ph"))
        .await
        .unwrap();
    assert_eq!(batch.documents.len(), 1);
    assert_eq!(batch.documents[0].arxiv_id, "2303.00003v1");
}

#[tokio::test]
async fn test_long_paper_chunks_overlap() {
    let papers = TestPapers::long_paper(100);
    let services = create_test_services(&papers);

    let pipeline = services.create_processing_pipeline(services.default_chunker().unwrap());
    let (chunks, stats) = pipeline.process(&papers.documents).await;

    assert_valid_stats(&stats);
    assert!(chunks.len() > 3);
    for pair in chunks.windows(2) {
        assert!(pair[1].start_char < pair[0].end_char, "consecutive chunks overlap");
    }
    // Cuts snap to sentence ends, so every chunk ends with a full stop
    for chunk in &chunks {
        assert!(chunk.text.ends_with('.'), "chunk does not end a sentence: {:?}", chunk.text);
    }
}

#[tokio::test]
async fn test_missing_paper_file_is_skipped() {
    let papers = TestPapers::small();
    let services = create_test_services(&papers);
    std::fs::remove_file(&papers.documents[0].pdf_path).unwrap();

    let pipeline = services.create_processing_pipeline(services.default_chunker().unwrap());
    let (chunks, stats) = pipeline.process(&papers.documents).await;

    assert_eq!(stats.papers_processed, 2);
    assert_eq!(stats.papers_skipped, 1);
    assert!(chunks.iter().all(|c| c.metadata.arxiv_id != "2301.00001v1"));
}

#[tokio::test]
async fn test_reindexing_appends_and_persists() {
    let papers = TestPapers::small();
    let services = create_test_services(&papers);

    let pipeline = services.create_processing_pipeline(services.default_chunker().unwrap());
    let (chunks, _) = pipeline.process(&papers.documents).await;

    let indexer = services.create_indexing_pipeline();
    indexer.index_chunks(&chunks).await.unwrap();
    let second = indexer.index_chunks(&chunks).await.unwrap();
    assert_eq!(second.first_id, chunks.len());
    assert_eq!(second.total_in_index, chunks.len() * 2);

    // A fresh services value reopens the same snapshot
    let reopened = create_test_services(&papers);
    assert_eq!(reopened.index.count().await.unwrap(), chunks.len() * 2);
}
