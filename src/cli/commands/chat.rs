//! Chat command - interactive question loop over stdin

use crate::cli::commands::ask::validate_k;
use crate::cli::output::{colors, print_warning};
use crate::cli::OutputFormat;
use crate::core::index::VectorIndex;
use crate::core::query::SessionSummary;
use crate::core::services::Services;
use clap::Args;
use std::io;
use std::sync::Arc;

/// Arguments for the chat command
#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Number of chunks to retrieve per question
    #[arg(short = 'k', long)]
    pub k: Option<usize>,

    /// Print only the sources and answer, not the full prompt
    #[arg(long)]
    pub brief: bool,
}

/// Run the interactive loop on stdin/stdout
pub async fn chat(services: &Services, args: &ChatArgs) -> crate::core::error::Result<SessionSummary> {
    let pipeline = services.create_qa_pipeline();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    pipeline
        .interactive(stdin.lock(), &mut stdout, args.k, !args.brief)
        .await
}

/// Execute the chat command
pub async fn execute(
    args: ChatArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_k(args.k, services)?;

    if services.index.count().await? == 0 {
        print_warning("The index is empty. Run 'paper-rag index' first.");
    }

    let summary = chat(services, &args).await?;

    match format {
        OutputFormat::Human => print_summary(&summary),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "answered": summary.answered,
                "failed": summary.failed,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

pub(crate) fn print_summary(summary: &SessionSummary) {
    println!(
        "\n{} {} answered, {} failed",
        colors::dim("Session ended:"),
        colors::number(&summary.answered.to_string()),
        colors::number(&summary.failed.to_string())
    );
}
