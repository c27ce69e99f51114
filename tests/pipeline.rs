//! Pipeline integration tests
//!
//! Runs the full review-and-revise flow against a mock LLM client.

use std::sync::Arc;

use redline::agents::ReviserAgent;
use redline::error::RedlineError;
use redline::llm::{
    CompletionResponse, ContentBlock, MockLlmClient, ResponseContent,
};
use redline::pipeline::{Pipeline, default_output_path};
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Full pipeline on a clean document: both checkers return the sentinel,
/// the revised text lands in the default output path
#[tokio::test]
async fn test_pipeline_clean_document() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "draft.md", "# Draft\n\nThe sky is blue.\n");

    let mock = Arc::new(MockLlmClient::new());
    mock.push_text("no issues found");
    mock.push_text("no issues found");
    mock.push_text("# Draft\n\nThe sky is blue.\n");

    let pipeline = Pipeline::new(mock.clone());
    let report = pipeline.run(&input, None, false).await.unwrap();

    assert!(!report.evidence.has_issues);
    assert!(!report.proofread.has_issues);
    assert!(!report.any_issues());
    assert_eq!(report.output_path, temp_dir.path().join("draft_revised.md"));
    assert_eq!(
        std::fs::read_to_string(&report.output_path).unwrap(),
        "# Draft\n\nThe sky is blue.\n"
    );
    assert_eq!(mock.calls(), 3);
}

/// A checker response containing a correction flags issues and the
/// feedback reaches the reviser request
#[tokio::test]
async fn test_pipeline_with_issues() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "draft.md", "The sky is green.\n");

    let mock = Arc::new(MockLlmClient::new());
    mock.push_text("- Location: \"The sky is green.\"\n- Issue: the sky is blue");
    mock.push_text("no issues found");
    mock.push_text("The sky is blue.\n");

    let pipeline = Pipeline::new(mock.clone());
    let report = pipeline.run(&input, None, false).await.unwrap();

    assert!(report.evidence.has_issues);
    assert!(!report.proofread.has_issues);
    assert!(report.any_issues());

    // The reviser request (third call) carries the original document and
    // both feedback texts
    let revise_request = mock.request(2).unwrap();
    let user = &revise_request.messages[0].content;
    assert!(user.contains("The sky is green."));
    assert!(user.contains("the sky is blue"));
    assert!(user.contains("no issues found"));
}

/// Explicit output path wins over the default
#[tokio::test]
async fn test_pipeline_explicit_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "draft.md", "body\n");
    let output = temp_dir.path().join("final.md");

    let mock = Arc::new(MockLlmClient::new());
    mock.push_text("no issues found");
    mock.push_text("no issues found");
    mock.push_text("revised body\n");

    let pipeline = Pipeline::new(mock.clone());
    let report = pipeline.run(&input, Some(&output), false).await.unwrap();

    assert_eq!(report.output_path, output);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "revised body\n");
}

/// An empty input file fails before any remote call
#[tokio::test]
async fn test_pipeline_empty_input_short_circuits() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "empty.md", "   \n\n");

    let mock = Arc::new(MockLlmClient::new());
    let pipeline = Pipeline::new(mock.clone());
    let result = pipeline.run(&input, None, false).await;

    assert!(matches!(result, Err(RedlineError::Input(_))));
    assert_eq!(mock.calls(), 0);
}

/// A missing input file fails before any remote call
#[tokio::test]
async fn test_pipeline_missing_input_short_circuits() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("absent.md");

    let mock = Arc::new(MockLlmClient::new());
    let pipeline = Pipeline::new(mock.clone());
    let result = pipeline.run(&input, None, false).await;

    assert!(matches!(result, Err(RedlineError::Input(_))));
    assert_eq!(mock.calls(), 0);
}

/// An unwritable output path surfaces as an output error after the
/// completion calls
#[tokio::test]
async fn test_pipeline_unwritable_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "draft.md", "body\n");
    let output = temp_dir.path().join("missing-dir").join("final.md");

    let mock = Arc::new(MockLlmClient::new());
    let pipeline = Pipeline::new(mock.clone());
    let result = pipeline.run(&input, Some(&output), false).await;

    assert!(matches!(result, Err(RedlineError::Output(_))));
    assert_eq!(mock.calls(), 3);
}

/// Checkers run at temperature 0.0, the reviser at 0.3
#[tokio::test]
async fn test_pipeline_temperatures() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "draft.md", "body\n");

    let mock = Arc::new(MockLlmClient::new());
    let pipeline = Pipeline::new(mock.clone());
    pipeline.run(&input, None, false).await.unwrap();

    assert_eq!(mock.request(0).unwrap().temperature, Some(0.0));
    assert_eq!(mock.request(1).unwrap().temperature, Some(0.0));
    assert_eq!(mock.request(2).unwrap().temperature, Some(0.3));
}

/// A segmented reviser response is flattened before the write: text
/// segments concatenate in order, the rest are dropped
#[tokio::test]
async fn test_pipeline_segmented_reviser_response() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "draft.md", "body\n");

    let mock = Arc::new(MockLlmClient::new());
    mock.push_text("no issues found");
    mock.push_text("no issues found");
    mock.push_response(CompletionResponse {
        content: ResponseContent::Blocks(vec![
            ContentBlock::Text {
                text: "# Revised\n".to_string(),
            },
            ContentBlock::Other(serde_json::json!({"functionCall": {"name": "noop"}})),
            ContentBlock::Text {
                text: "Body.\n".to_string(),
            },
        ]),
        ..Default::default()
    });

    let pipeline = Pipeline::new(mock.clone());
    let report = pipeline.run(&input, None, false).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(&report.output_path).unwrap(),
        "# Revised\nBody.\n"
    );
}

/// save() then read returns exactly the saved bytes
#[test]
fn test_save_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.md");

    let agent = ReviserAgent::new(Arc::new(MockLlmClient::new()));
    let text = "# Títle\n\n技術記事 — content.\n";
    agent.save(text, &path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), text.as_bytes());
}

/// Default output naming keeps the input's extension
#[test]
fn test_default_output_path_naming() {
    assert_eq!(
        default_output_path(std::path::Path::new("/tmp/a/article.md")),
        std::path::PathBuf::from("/tmp/a/article_revised.md")
    );
    assert_eq!(
        default_output_path(std::path::Path::new("notes")),
        std::path::PathBuf::from("notes_revised")
    );
}
