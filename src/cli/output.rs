//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use crate::core::query::report::{rule, TITLE_PREVIEW_CHARS};
use crate::core::types::{QueryResult, RetrievedChunk};

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for arXiv ids
    pub fn paper_id(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for retrieval distances
    pub fn distance(s: &str) -> ColoredString {
        s.magenta()
    }

    /// Style for rank numbers
    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Format milliseconds into a colored duration
pub fn format_ms_colored(ms: u64) -> String {
    format!("{}", colors::number(&format_duration(ms as f64 / 1000.0)))
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}

/// Print a step banner such as `[2/4] Processing documents...`
pub fn print_step(step: usize, total: usize, title: &str) {
    println!(
        "\n{} {}",
        colors::dim(&format!("[{step}/{total}]")),
        colors::label(title)
    );
}

fn print_source(source: &RetrievedChunk) {
    let title: String = source.title().chars().take(TITLE_PREVIEW_CHARS).collect();
    println!(
        "  {}. {}... {}",
        colors::rank(&source.rank.to_string()),
        title,
        colors::distance(&format!("(distance: {:.3})", source.distance))
    );
}

/// Print a query result in the verbose report layout
pub fn print_query_result(result: &QueryResult, show_prompt: bool) {
    println!("\n{}", colors::dim(&rule()));
    println!("{} {}", colors::label("Query:"), result.query);
    println!("{}\n", colors::dim(&rule()));

    println!(
        "Retrieved {} relevant chunks",
        colors::number(&result.sources.len().to_string())
    );
    for source in &result.sources {
        print_source(source);
    }

    if show_prompt {
        println!(
            "\nPrompt built ({} chars)",
            colors::number(&result.prompt.chars().count().to_string())
        );
        println!("\n{}", colors::dim(&rule()));
        print_header("PROMPT:");
        println!("{}", colors::dim(&rule()));
        println!("{}", result.prompt);
    }

    println!("\n{}", colors::dim(&rule()));
    print_header("ANSWER:");
    println!("{}", colors::dim(&rule()));
    println!("{}", result.answer);
    println!("{}", colors::dim(&rule()));
}
