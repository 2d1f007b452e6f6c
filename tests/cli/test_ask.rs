//! Tests for the ask command

use super::test_helpers::{create_cli_test_services, setup_ingested_workspace};
use paper_rag::cli::commands::{ask, AskArgs};
use paper_rag::cli::OutputFormat;

fn ask_args(question: &str, k: Option<usize>) -> AskArgs {
    AskArgs {
        question: question.to_string(),
        k,
        no_prompt: false,
    }
}

#[tokio::test]
async fn test_ask_after_ingest() {
    let (services, _papers) = setup_ingested_workspace().await;

    ask::execute(ask_args("What do surface codes protect?", None), &services, OutputFormat::Human)
        .await
        .unwrap();
    ask::execute(ask_args("Bell inequality", Some(1)), &services, OutputFormat::Json)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ask_on_empty_index_still_answers() {
    let (services, _papers) = create_cli_test_services();

    ask::execute(ask_args("Anything indexed?", None), &services, OutputFormat::Json)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ask_rejects_out_of_range_k() {
    let (services, _papers) = create_cli_test_services();

    assert!(ask::execute(ask_args("q", Some(0)), &services, OutputFormat::Json)
        .await
        .is_err());

    let too_many = services.config.retrieval.max_k + 1;
    let err = ask::execute(ask_args("q", Some(too_many)), &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("exceeds the maximum"));
}

#[tokio::test]
async fn test_ask_rejects_blank_question() {
    let (services, _papers) = create_cli_test_services();

    let err = ask::execute(ask_args("   ", None), &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid query"));
}
