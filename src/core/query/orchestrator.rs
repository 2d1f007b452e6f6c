//! Question answering: retrieve → build prompt → generate.
//!
//! Each question moves the pipeline through
//! `Idle → Retrieving → PromptBuilding → Generating → Idle`.
//! Only a retrieval failure ends a question early; a failing
//! generator is replaced by the placeholder answer so the caller
//! still gets the sources and prompt.

use std::fmt;
use std::io::{BufRead, Write};
use std::sync::{Arc, RwLock};

use crate::core::error::Result;
use crate::core::generation::{Generator, PLACEHOLDER_ANSWER};
use crate::core::query::context::build_prompt;
use crate::core::query::report::write_report;
use crate::core::query::Retriever;
use crate::core::types::QueryResult;

/// Words that end the interactive loop (case-insensitive)
pub const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Retrieving,
    PromptBuilding,
    Generating,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Retrieving => "retrieving",
            Self::PromptBuilding => "prompt_building",
            Self::Generating => "generating",
        };
        write!(f, "{name}")
    }
}

/// Outcome counts for one interactive session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: usize,
    pub failed: usize,
}

pub struct QaPipeline {
    retriever: Retriever,
    generator: Arc<dyn Generator>,
    default_k: usize,
    state: RwLock<PipelineState>,
}

impl QaPipeline {
    pub fn new(retriever: Retriever, generator: Arc<dyn Generator>, default_k: usize) -> Self {
        Self {
            retriever,
            generator,
            default_k,
            state: RwLock::new(PipelineState::Idle),
        }
    }

    pub fn state(&self) -> PipelineState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn default_k(&self) -> usize {
        self.default_k
    }

    fn transition(&self, to: PipelineState) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        tracing::debug!("pipeline state: {} -> {}", *state, to);
        *state = to;
    }

    /// Answer one question using `k` chunks (default if `None`)
    pub async fn ask(&self, query: &str, k: Option<usize>) -> Result<QueryResult> {
        let k = k.unwrap_or(self.default_k);
        tracing::info!(k, "Answering: {}", query);

        self.transition(PipelineState::Retrieving);
        let sources = match self.retriever.retrieve(query, k).await {
            Ok(sources) => sources,
            Err(e) => {
                tracing::error!(error = %e, "retrieval failed");
                self.transition(PipelineState::Idle);
                return Err(e);
            }
        };
        tracing::info!("Retrieved {} relevant chunks", sources.len());

        self.transition(PipelineState::PromptBuilding);
        let prompt = build_prompt(query, &sources);
        tracing::debug!("Prompt built ({} chars)", prompt.chars().count());

        self.transition(PipelineState::Generating);
        let answer = match self.generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "generation failed, using placeholder answer"
                );
                PLACEHOLDER_ANSWER.to_string()
            }
        };

        self.transition(PipelineState::Idle);

        Ok(QueryResult {
            query: query.to_string(),
            answer,
            prompt,
            sources,
        })
    }

    /// Read questions line by line from `input` until an exit word or
    /// end of input, writing each report to `output`
    ///
    /// Blank lines are ignored. A failed question is reported and the
    /// loop carries on.
    pub async fn interactive<R: BufRead, W: Write>(
        &self,
        mut input: R,
        output: &mut W,
        k: Option<usize>,
        verbose: bool,
    ) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        writeln!(output, "{}", "=".repeat(60))?;
        writeln!(output, "Ready for questions! (type 'quit' to exit)")?;
        writeln!(output, "{}", "=".repeat(60))?;

        loop {
            write!(output, "\nYour question: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            let query = line.trim();
            if EXIT_COMMANDS.contains(&query.to_lowercase().as_str()) {
                break;
            }
            if query.is_empty() {
                continue;
            }

            match self.ask(query, k).await {
                Ok(result) => {
                    write_report(output, &result, verbose)?;
                    summary.answered += 1;
                }
                Err(e) => {
                    writeln!(output, "Error: {e}")?;
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "Session ended: {} answered, {} failed",
            summary.answered,
            summary.failed
        );
        Ok(summary)
    }
}
