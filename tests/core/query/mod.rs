//! Query-time tests

mod test_prompt;
mod test_retrieval;
