//! Index command - embed processed chunks into the vector index

use crate::cli::commands::with_hint;
use crate::cli::output::{colors, format_ms_colored};
use crate::cli::OutputFormat;
use crate::core::embedding::Embedder;
use crate::core::index::{chunk_id, VectorIndex};
use crate::core::ingest::store;
use crate::core::services::Services;
use crate::core::types::IndexStats;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the index command
#[derive(Args, Debug, Default)]
pub struct IndexArgs {
    /// Chunk file to index (defaults to the processed chunks.json)
    #[arg(long)]
    pub chunks: Option<PathBuf>,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub backend: String,
    pub collection: String,
    pub embedder: String,
    pub chunks_indexed: usize,
    pub first_id: String,
    pub total_in_index: usize,
    pub duration_ms: u64,
}

/// Load a chunk file and embed it into the configured index
pub async fn index_chunk_file(
    services: &Services,
    path: Option<PathBuf>,
) -> crate::core::error::Result<IndexStats> {
    let path = path.unwrap_or_else(|| services.config.storage.chunks_path());
    let chunks = store::load_chunks(&path)?;
    services.create_indexing_pipeline().index_chunks(&chunks).await
}

impl IndexResponse {
    pub fn new(stats: IndexStats, services: &Services) -> Self {
        Self {
            backend: services.index.name().to_string(),
            collection: services.config.index.collection.clone(),
            embedder: services.embedder.name().to_string(),
            chunks_indexed: stats.chunks_indexed,
            first_id: chunk_id(stats.first_id),
            total_in_index: stats.total_in_index,
            duration_ms: stats.duration_ms,
        }
    }
}

/// Execute the index command
pub async fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if format == OutputFormat::Human {
        eprintln!(
            "Embedding with {} into {} collection '{}'...",
            colors::label(services.embedder.name()),
            services.index.name(),
            colors::label(&services.config.index.collection)
        );
    }

    let stats = index_chunk_file(services, args.chunks)
        .await
        .map_err(|e| with_hint(e, "Run 'paper-rag process' first."))?;
    let response = IndexResponse::new(stats, services);

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

pub(crate) fn print_human(response: &IndexResponse) {
    println!(
        "{} {} chunks in {} (starting at {})",
        colors::success("Indexed"),
        colors::number(&response.chunks_indexed.to_string()),
        format_ms_colored(response.duration_ms),
        colors::dim(&response.first_id)
    );
    println!(
        "Collection '{}' now holds {} entries",
        response.collection,
        colors::number(&response.total_in_index.to_string())
    );
}
