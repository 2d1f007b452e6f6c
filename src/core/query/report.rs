//! Plain-text rendering of query results.
//!
//! Used by the interactive loop; the CLI's `ask` command renders its
//! own colored version of the same layout.

use std::io::{self, Write};

use crate::core::types::{QueryResult, RetrievedChunk};

/// Width of the `=` rules framing each section
pub const RULE_WIDTH: usize = 60;

/// Titles in source listings are cut to this many characters
pub const TITLE_PREVIEW_CHARS: usize = 50;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// `Title prefix... (distance: 0.123)`
pub fn source_line(chunk: &RetrievedChunk) -> String {
    let title: String = chunk.title().chars().take(TITLE_PREVIEW_CHARS).collect();
    format!("{}. {}... (distance: {:.3})", chunk.rank, title, chunk.distance)
}

/// Write a result; `verbose` adds the source list and the prompt
pub fn write_report<W: Write>(out: &mut W, result: &QueryResult, verbose: bool) -> io::Result<()> {
    if verbose {
        writeln!(out, "\n{}", rule())?;
        writeln!(out, "Query: {}", result.query)?;
        writeln!(out, "{}\n", rule())?;

        writeln!(out, "Retrieved {} relevant chunks", result.sources.len())?;
        for source in &result.sources {
            writeln!(out, "  {}", source_line(source))?;
        }
        writeln!(out, "\nPrompt built ({} chars)", result.prompt.chars().count())?;

        writeln!(out, "\n{}", rule())?;
        writeln!(out, "PROMPT:")?;
        writeln!(out, "{}", rule())?;
        writeln!(out, "{}", result.prompt)?;
    }

    writeln!(out, "\n{}", rule())?;
    writeln!(out, "ANSWER:")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", result.answer)?;
    writeln!(out, "{}", rule())?;
    Ok(())
}
