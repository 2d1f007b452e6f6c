//! paper-rag - question answering over arXiv papers
//!
//! # Examples
//!
//! ```bash
//! # Download, process, index, then ask questions interactively
//! paper-rag run --query "quantum error correction" --max-results 10
//!
//! # Run the stages one at a time
//! paper-rag download --category quant-ph
//! paper-rag process --chunk-size 800 --overlap 150
//! paper-rag index
//!
//! # One-off question
//! paper-rag ask "What is decoherence?" -k 5
//! ```
//!
//! Logs go to stderr. `RUST_LOG` overrides the level and
//! `PAPER_RAG_LOG_FORMAT=json` switches to structured output.

use clap::Parser;
use paper_rag::cli::{run, Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "paper_rag=debug"
    } else {
        "paper_rag=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let json = std::env::var("PAPER_RAG_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::info!("paper-rag {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
