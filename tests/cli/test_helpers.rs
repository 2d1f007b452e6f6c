//! CLI test helpers
//!
//! Provides utilities for testing CLI commands including:
//! - Arc<Services> wrappers matching CLI execute() signatures
//! - A fully ingested workspace for query commands

use crate::common::{create_test_services, TestPapers};
use paper_rag::cli::commands::{download, index, process};
use paper_rag::cli::commands::{DownloadArgs, IndexArgs, ProcessArgs};
use paper_rag::cli::OutputFormat;
use paper_rag::core::services::Services;
use std::sync::Arc;

/// Create test services over the small fixture set
///
/// # Returns
/// The services and the fixture (keep alive during test)
pub fn create_cli_test_services() -> (Arc<Services>, TestPapers) {
    let papers = TestPapers::small();
    let services = create_test_services(&papers);
    (services, papers)
}

/// Run download, process and index through their commands
pub async fn setup_ingested_workspace() -> (Arc<Services>, TestPapers) {
    let (services, papers) = create_cli_test_services();

    download::execute(DownloadArgs::default(), &services, OutputFormat::Json)
        .await
        .expect("download failed");
    process::execute(ProcessArgs::default(), &services, OutputFormat::Json)
        .await
        .expect("process failed");
    index::execute(IndexArgs::default(), &services, OutputFormat::Json)
        .await
        .expect("index failed");

    (services, papers)
}
