//! Process command - extract, clean and chunk downloaded papers

use crate::cli::output::{colors, format_ms_colored, print_warning};
use crate::cli::commands::with_hint;
use crate::cli::OutputFormat;
use crate::core::ingest::{store, Chunker};
use crate::core::services::Services;
use crate::core::source::DocumentSource;
use crate::core::types::{Chunk, DocumentChunkCount, ProcessStats};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the process command
#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// Characters per chunk (defaults to the configured size)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between chunks (defaults to the configured overlap)
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Only process papers tagged with this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

/// Processing result response
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub papers_processed: usize,
    pub papers_skipped: usize,
    pub chunks_created: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    pub duration_ms: u64,
    pub output: String,
    pub per_document: Vec<DocumentChunkCount>,
}

impl ProcessArgs {
    /// Build the chunker, letting arguments override the configuration
    pub fn chunker(&self, services: &Services) -> crate::core::error::Result<Chunker> {
        if self.chunk_size.is_none() && self.overlap.is_none() {
            return services.default_chunker();
        }
        let chunking = &services.config.chunking;
        Chunker::new(
            self.chunk_size.unwrap_or(chunking.chunk_size),
            self.overlap.unwrap_or(chunking.chunk_overlap),
        )
    }
}

/// Chunk every paper in the manifest and write `chunks.json`
pub async fn process_papers(
    services: &Services,
    chunker: Chunker,
    category: Option<&str>,
) -> crate::core::error::Result<(Vec<Chunk>, ProcessStats)> {
    let batch = services
        .manifest_source()
        .search("", usize::MAX, category)
        .await?;

    let pipeline = services.create_processing_pipeline(chunker);
    let (chunks, stats) = pipeline.process(&batch.documents).await;

    store::save_chunks(&services.config.storage.chunks_path(), &chunks)?;
    Ok((chunks, stats))
}

/// Execute the process command
pub async fn execute(
    args: ProcessArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunker = args.chunker(services)?;
    let (chunk_size, overlap) = (chunker.chunk_size(), chunker.overlap());

    let (_, stats) = process_papers(services, chunker, args.category.as_deref())
        .await
        .map_err(|e| with_hint(e, "Run 'paper-rag download' first."))?;

    let response = ProcessResponse::new(stats, chunk_size, overlap, services);

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

impl ProcessResponse {
    pub fn new(stats: ProcessStats, chunk_size: usize, overlap: usize, services: &Services) -> Self {
        Self {
            papers_processed: stats.papers_processed,
            papers_skipped: stats.papers_skipped,
            chunks_created: stats.chunks_created,
            chunk_size,
            overlap,
            duration_ms: stats.duration_ms,
            output: services
                .config
                .storage
                .chunks_path()
                .to_string_lossy()
                .into_owned(),
            per_document: stats.per_document,
        }
    }
}

pub(crate) fn print_human(response: &ProcessResponse) {
    for doc in &response.per_document {
        println!(
            "  {} {} chunks  {}",
            colors::paper_id(&doc.arxiv_id),
            colors::number(&format!("{:>4}", doc.chunks)),
            colors::dim(&doc.title)
        );
    }
    println!(
        "{} {} papers into {} chunks ({} chars, {} overlap) in {}",
        colors::success("Processed"),
        colors::number(&response.papers_processed.to_string()),
        colors::number(&response.chunks_created.to_string()),
        response.chunk_size,
        response.overlap,
        format_ms_colored(response.duration_ms)
    );
    if response.papers_skipped > 0 {
        print_warning(&format!(
            "{} papers yielded no text and were skipped",
            response.papers_skipped
        ));
    }
    println!("Chunks saved to {}", colors::file_path(&response.output));
}
