//! Download command - search arXiv and fetch matching papers

use crate::cli::output::{colors, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::SourceConfig;
use crate::core::ingest::store;
use crate::core::services::Services;
use crate::core::source::{DocumentSource, SourceBatch};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the download command
#[derive(Args, Debug, Default)]
pub struct DownloadArgs {
    /// Search query (defaults to the configured query)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// arXiv category filter, e.g. quant-ph (defaults to the configured category)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Search all categories, ignoring the configured filter
    #[arg(long, conflicts_with = "category")]
    pub all_categories: bool,

    /// Maximum number of papers to fetch
    #[arg(long, short = 'n')]
    pub max_results: Option<usize>,
}

/// Download result response
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub query: String,
    pub category: Option<String>,
    pub found: usize,
    pub downloaded: usize,
    pub already_present: usize,
    pub failed: usize,
    pub manifest: String,
    pub papers: Vec<PaperSummary>,
}

#[derive(Debug, Serialize)]
pub struct PaperSummary {
    pub arxiv_id: String,
    pub title: String,
}

/// Search parameters after falling back to the `[source]` configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub category: Option<String>,
    pub max_results: usize,
}

impl DownloadArgs {
    pub fn resolve(&self, config: &SourceConfig) -> SearchParams {
        SearchParams {
            query: self.query.clone().unwrap_or_else(|| config.query.clone()),
            category: if self.all_categories {
                None
            } else {
                self.category.clone().or_else(|| config.category.clone())
            },
            max_results: self.max_results.unwrap_or(config.max_results),
        }
    }
}

/// Search the configured source and record the results in `papers.json`
pub async fn download_papers(
    services: &Services,
    params: &SearchParams,
) -> crate::core::error::Result<SourceBatch> {
    let batch = services
        .source
        .search(&params.query, params.max_results, params.category.as_deref())
        .await?;

    store::save_manifest(&services.config.storage.manifest_path(), &batch.documents)?;
    Ok(batch)
}

/// Execute the download command
pub async fn execute(
    args: DownloadArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.max_results == Some(0) {
        return Err("Max results must be at least 1.".into());
    }

    let params = args.resolve(&services.config.source);
    if format == OutputFormat::Human {
        eprintln!(
            "Searching {} for '{}'...",
            services.source.name(),
            colors::label(&params.query)
        );
    }

    let batch = download_papers(services, &params).await?;
    let response = DownloadResponse::new(params, &batch, services);

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

impl DownloadResponse {
    pub fn new(params: SearchParams, batch: &SourceBatch, services: &Services) -> Self {
        Self {
            query: params.query,
            category: params.category,
            found: batch.stats.found,
            downloaded: batch.stats.downloaded,
            already_present: batch.stats.already_present,
            failed: batch.stats.failed,
            manifest: services
                .config
                .storage
                .manifest_path()
                .to_string_lossy()
                .into_owned(),
            papers: batch
                .documents
                .iter()
                .map(|d| PaperSummary {
                    arxiv_id: d.arxiv_id.clone(),
                    title: d.title.clone(),
                })
                .collect(),
        }
    }
}

pub(crate) fn print_human(response: &DownloadResponse) {
    for paper in &response.papers {
        println!("  {} {}", colors::paper_id(&paper.arxiv_id), paper.title);
    }
    println!(
        "{} {} papers ({} new, {} already present)",
        colors::success("Found"),
        colors::number(&response.found.to_string()),
        colors::number(&response.downloaded.to_string()),
        colors::number(&response.already_present.to_string())
    );
    if response.failed > 0 {
        print_warning(&format!("{} papers failed to download", response.failed));
    }
    println!("Manifest: {}", colors::file_path(&response.manifest));
}
