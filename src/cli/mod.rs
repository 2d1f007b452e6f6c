//! CLI adapter for paper-rag
//!
//! Provides the command-line interface over the core pipelines. Each
//! ingestion stage has its own command so it can be re-run alone;
//! `run` chains all of them and ends in the interactive loop.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     core/        |
//! |  (domain logic)  |
//! +--------+---------+
//!          |
//!          v
//! +------------------+
//! |      cli/        |
//! | (clap adapter)   |
//! +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// paper-rag - question answering over research papers
///
/// Download arXiv papers, chunk and index them, then ask questions
/// answered from the most relevant passages with source citations.
#[derive(Parser, Debug)]
#[command(name = "paper-rag")]
#[command(version)]
#[command(about = "Retrieval-augmented Q&A over arXiv papers", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search arXiv and download matching papers
    Download(commands::DownloadArgs),

    /// Extract, clean and chunk downloaded papers into chunks.json
    Process(commands::ProcessArgs),

    /// Embed chunks.json into the vector index
    Index(commands::IndexArgs),

    /// Answer a single question
    Ask(commands::AskArgs),

    /// Answer questions interactively (type 'quit' to exit)
    Chat(commands::ChatArgs),

    /// Download, process and index, then start the interactive loop
    Run(commands::RunArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  paper-rag completions bash > ~/.local/share/bash-completion/completions/paper-rag
    ///   zsh:   paper-rag completions zsh > ~/.zfunc/_paper-rag
    ///   fish:  paper-rag completions fish > ~/.config/fish/completions/paper-rag.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config)?);

    // Execute command
    match cli.command {
        Commands::Download(args) => commands::download::execute(args, &services, cli.format).await,
        Commands::Process(args) => commands::process::execute(args, &services, cli.format).await,
        Commands::Index(args) => commands::index::execute(args, &services, cli.format).await,
        Commands::Ask(args) => commands::ask::execute(args, &services, cli.format).await,
        Commands::Chat(args) => commands::chat::execute(args, &services, cli.format).await,
        Commands::Run(args) => commands::run::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
