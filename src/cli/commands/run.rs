//! Run command - the whole pipeline, ending in the interactive loop
//!
//! Steps: download papers, process them into chunks, index the
//! chunks, then answer questions until the user quits. Each step
//! writes the artifact the next one reads, so a failed run can be
//! resumed with `--skip-download` or by running the later commands.

use crate::cli::commands::ask::validate_k;
use crate::cli::commands::{chat, download, index, process};
use crate::cli::commands::{ChatArgs, DownloadArgs, ProcessArgs};
use crate::cli::output::{print_step, print_success, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

const TOTAL_STEPS: usize = 4;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Search query (defaults to the configured query)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// arXiv category filter (defaults to the configured category)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Maximum number of papers to fetch
    #[arg(long, short = 'n')]
    pub max_results: Option<usize>,

    /// Reuse the papers from the last download instead of searching
    #[arg(long)]
    pub skip_download: bool,

    /// Number of chunks to retrieve per question
    #[arg(short = 'k', long)]
    pub k: Option<usize>,

    /// Stop after indexing instead of starting the interactive loop
    #[arg(long)]
    pub no_chat: bool,
}

/// Combined result of the ingestion steps
#[derive(Debug, Serialize)]
pub struct RunResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<download::DownloadResponse>,
    pub process: process::ProcessResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<index::IndexResponse>,
}

/// Execute the run command
pub async fn execute(
    args: RunArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.max_results == Some(0) {
        return Err("Max results must be at least 1.".into());
    }
    validate_k(args.k, services)?;
    let human = format == OutputFormat::Human;

    // Step 1: download
    if human {
        print_step(1, TOTAL_STEPS, "Downloading papers...");
    }
    let download = if args.skip_download {
        if human {
            println!("Skipped, using the existing manifest");
        }
        None
    } else {
        let params = DownloadArgs {
            query: args.query.clone(),
            category: args.category.clone(),
            all_categories: false,
            max_results: args.max_results,
        }
        .resolve(&services.config.source);
        let batch = download::download_papers(services, &params).await?;
        let response = download::DownloadResponse::new(params, &batch, services);
        if human {
            download::print_human(&response);
        }
        Some(response)
    };

    // Step 2: process
    if human {
        print_step(2, TOTAL_STEPS, "Processing documents...");
    }
    let chunker = ProcessArgs::default().chunker(services)?;
    let (chunk_size, overlap) = (chunker.chunk_size(), chunker.overlap());
    let (chunks, stats) = process::process_papers(services, chunker, None).await?;
    let processed = process::ProcessResponse::new(stats, chunk_size, overlap, services);
    if human {
        process::print_human(&processed);
    }

    // Step 3: index
    if human {
        print_step(3, TOTAL_STEPS, "Building vector index...");
    }
    let indexed = if chunks.is_empty() {
        if human {
            print_warning("No chunks were produced; nothing to index");
        }
        None
    } else {
        let stats = services
            .create_indexing_pipeline()
            .index_chunks(&chunks)
            .await?;
        let response = index::IndexResponse::new(stats, services);
        if human {
            index::print_human(&response);
        }
        Some(response)
    };

    if format == OutputFormat::Json {
        let response = RunResponse {
            download,
            process: processed,
            index: indexed,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    if args.no_chat {
        return Ok(());
    }

    // Step 4: interactive questions
    if human {
        print_step(4, TOTAL_STEPS, "Starting Q&A...");
        print_success("Pipeline ready");
    }
    let chat_args = ChatArgs {
        k: args.k,
        brief: false,
    };
    let summary = chat::chat(services, &chat_args).await?;
    if human {
        chat::print_summary(&summary);
    }

    Ok(())
}
