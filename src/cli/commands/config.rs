//! Config command - show the effective configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the show-config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Also show derived file locations
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub data_dir: String,
    pub chunking: ChunkingSummary,
    pub source: SourceSummary,
    pub embedding: BackendSummary,
    pub index: BackendSummary,
    pub generation: BackendSummary,
    pub retrieval: RetrievalSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsSummary>,
}

#[derive(Debug, Serialize)]
pub struct ChunkingSummary {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Serialize)]
pub struct SourceSummary {
    pub query: String,
    pub category: Option<String>,
    pub max_results: usize,
}

#[derive(Debug, Serialize)]
pub struct BackendSummary {
    pub backend: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct RetrievalSummary {
    pub default_k: usize,
    pub max_k: usize,
}

#[derive(Debug, Serialize)]
pub struct PathsSummary {
    pub papers_dir: String,
    pub manifest: String,
    pub chunks: String,
    pub index_snapshot: String,
}

impl ConfigResponse {
    pub fn new(services: &Services, all: bool) -> Self {
        let config = &services.config;
        let storage = &config.storage;
        let display = |p: std::path::PathBuf| p.to_string_lossy().into_owned();

        Self {
            data_dir: display(storage.data_dir.clone()),
            chunking: ChunkingSummary {
                chunk_size: config.chunking.chunk_size,
                chunk_overlap: config.chunking.chunk_overlap,
            },
            source: SourceSummary {
                query: config.source.query.clone(),
                category: config.source.category.clone(),
                max_results: config.source.max_results,
            },
            embedding: BackendSummary {
                backend: config.embedding.provider.to_string(),
                detail: format!(
                    "{} ({} dims)",
                    config.embedding.model, config.embedding.dimensions
                ),
            },
            index: BackendSummary {
                backend: config.index.backend.to_string(),
                detail: format!("collection '{}'", config.index.collection),
            },
            generation: BackendSummary {
                backend: config.generation.backend.to_string(),
                detail: config.generation.model.clone(),
            },
            retrieval: RetrievalSummary {
                default_k: config.retrieval.default_k,
                max_k: config.retrieval.max_k,
            },
            paths: all.then(|| PathsSummary {
                papers_dir: display(storage.papers_dir()),
                manifest: display(storage.manifest_path()),
                chunks: display(storage.chunks_path()),
                index_snapshot: display(storage.index_snapshot_path(&config.index.collection)),
            }),
        }
    }
}

/// Execute the show-config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = ConfigResponse::new(services, args.all);

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  data_dir: {}", colors::file_path(&response.data_dir));
            println!("  chunking:");
            println!("    chunk_size: {}", response.chunking.chunk_size);
            println!("    chunk_overlap: {}", response.chunking.chunk_overlap);
            println!("  source:");
            println!("    query: {}", response.source.query);
            println!(
                "    category: {}",
                response.source.category.as_deref().unwrap_or("(any)")
            );
            println!("    max_results: {}", response.source.max_results);
            println!(
                "  embedding: {} {}",
                response.embedding.backend, response.embedding.detail
            );
            println!("  index: {} {}", response.index.backend, response.index.detail);
            println!(
                "  generation: {} {}",
                response.generation.backend, response.generation.detail
            );
            println!("  retrieval:");
            println!("    default_k: {}", response.retrieval.default_k);
            println!("    max_k: {}", response.retrieval.max_k);
            if let Some(paths) = &response.paths {
                println!("  paths:");
                println!("    papers: {}", colors::file_path(&paths.papers_dir));
                println!("    manifest: {}", colors::file_path(&paths.manifest));
                println!("    chunks: {}", colors::file_path(&paths.chunks));
                println!("    index: {}", colors::file_path(&paths.index_snapshot));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
