//! Tests for the download, process, index and run commands

use super::test_helpers::{create_cli_test_services, setup_ingested_workspace};
use paper_rag::cli::commands::{download, index, process, run};
use paper_rag::cli::commands::{DownloadArgs, IndexArgs, ProcessArgs, RunArgs};
use paper_rag::cli::OutputFormat;
use paper_rag::core::index::VectorIndex;
use paper_rag::core::ingest::store;

#[tokio::test]
async fn test_download_writes_manifest_with_configured_category() {
    let (services, _papers) = create_cli_test_services();

    download::execute(DownloadArgs::default(), &services, OutputFormat::Human)
        .await
        .unwrap();

    // Default category is quant-ph, so the astro-ph fixture is filtered out
    let manifest = store::load_manifest(&services.config.storage.manifest_path()).unwrap();
    assert_eq!(manifest.len(), 2);
}

#[tokio::test]
async fn test_download_all_categories_and_limit() {
    let (services, _papers) = create_cli_test_services();

    let args = DownloadArgs {
        all_categories: true,
        ..Default::default()
    };
    download::execute(args, &services, OutputFormat::Json)
        .await
        .unwrap();
    let manifest = store::load_manifest(&services.config.storage.manifest_path()).unwrap();
    assert_eq!(manifest.len(), 3);

    let args = DownloadArgs {
        all_categories: true,
        max_results: Some(1),
        ..Default::default()
    };
    download::execute(args, &services, OutputFormat::Json)
        .await
        .unwrap();
    let manifest = store::load_manifest(&services.config.storage.manifest_path()).unwrap();
    assert_eq!(manifest.len(), 1);
}

#[tokio::test]
async fn test_download_rejects_zero_results() {
    let (services, _papers) = create_cli_test_services();
    let args = DownloadArgs {
        max_results: Some(0),
        ..Default::default()
    };
    assert!(download::execute(args, &services, OutputFormat::Json)
        .await
        .is_err());
}

#[tokio::test]
async fn test_process_before_download_suggests_download() {
    let (services, _papers) = create_cli_test_services();

    let err = process::execute(ProcessArgs::default(), &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("paper-rag download"));
}

#[tokio::test]
async fn test_process_with_chunk_overrides() {
    let (services, _papers) = create_cli_test_services();
    download::execute(DownloadArgs::default(), &services, OutputFormat::Json)
        .await
        .unwrap();

    let args = ProcessArgs {
        chunk_size: Some(60),
        overlap: Some(10),
        category: None,
    };
    process::execute(args, &services, OutputFormat::Human)
        .await
        .unwrap();

    let chunks = store::load_chunks(&services.config.storage.chunks_path()).unwrap();
    assert!(chunks.len() > 2, "small chunks split each paper");
    assert!(chunks.iter().all(|c| c.span() <= 160));
}

#[tokio::test]
async fn test_process_rejects_overlap_not_below_size() {
    let (services, _papers) = create_cli_test_services();
    download::execute(DownloadArgs::default(), &services, OutputFormat::Json)
        .await
        .unwrap();

    let args = ProcessArgs {
        chunk_size: Some(100),
        overlap: Some(100),
        category: None,
    };
    assert!(process::execute(args, &services, OutputFormat::Json)
        .await
        .is_err());
}

#[tokio::test]
async fn test_index_before_process_suggests_process() {
    let (services, _papers) = create_cli_test_services();

    let err = index::execute(IndexArgs::default(), &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("paper-rag process"));
}

#[tokio::test]
async fn test_ingest_commands_fill_index() {
    let (services, _papers) = setup_ingested_workspace().await;

    let chunks = store::load_chunks(&services.config.storage.chunks_path()).unwrap();
    assert_eq!(services.index.count().await.unwrap(), chunks.len());
}

#[tokio::test]
async fn test_run_without_chat() {
    let (services, _papers) = create_cli_test_services();

    let args = RunArgs {
        no_chat: true,
        ..Default::default()
    };
    run::execute(args, &services, OutputFormat::Human)
        .await
        .unwrap();

    assert!(services.config.storage.manifest_path().exists());
    assert!(services.config.storage.chunks_path().exists());
    assert_eq!(services.index.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_run_skip_download_requires_manifest() {
    let (services, _papers) = create_cli_test_services();

    let args = RunArgs {
        skip_download: true,
        no_chat: true,
        ..Default::default()
    };
    assert!(run::execute(args, &services, OutputFormat::Json)
        .await
        .is_err());
}
