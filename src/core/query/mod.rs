//! Query-time components.
//!
//! - **retriever**: embeds the question and normalizes index hits
//! - **context**: renders hits into the answer prompt
//! - **orchestrator**: runs one question end to end, plus the
//!   interactive loop
//! - **report**: plain-text result rendering

pub mod context;
pub mod orchestrator;
pub mod report;
pub mod retriever;

pub use context::{build_context, build_prompt};
pub use orchestrator::{PipelineState, QaPipeline, SessionSummary};
pub use retriever::Retriever;
