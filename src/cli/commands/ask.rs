//! Ask command - answer a single question from the indexed papers

use crate::cli::output::{print_query_result, print_warning};
use crate::cli::OutputFormat;
use crate::core::index::VectorIndex;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to answer
    pub question: String,

    /// Number of chunks to retrieve (defaults to the configured k)
    #[arg(short = 'k', long)]
    pub k: Option<usize>,

    /// Hide the generated prompt in human output
    #[arg(long)]
    pub no_prompt: bool,
}

/// Reject `k` outside `1..=max_k`
pub(crate) fn validate_k(k: Option<usize>, services: &Services) -> Result<(), String> {
    match k {
        Some(0) => Err("k must be at least 1.".to_string()),
        Some(k) if k > services.config.retrieval.max_k => Err(format!(
            "k = {} exceeds the maximum of {}.",
            k, services.config.retrieval.max_k
        )),
        _ => Ok(()),
    }
}

/// Execute the ask command
pub async fn execute(
    args: AskArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_k(args.k, services)?;

    if services.index.count().await? == 0 {
        print_warning("The index is empty. Run 'paper-rag index' first.");
    }

    let pipeline = services.create_qa_pipeline();
    let result = pipeline.ask(&args.question, args.k).await?;

    match format {
        OutputFormat::Human => print_query_result(&result, !args.no_prompt),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
