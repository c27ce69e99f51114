//! Reviser agent: fold checker feedback back into the document
//!
//! Combines the original document and both feedback texts into one
//! generative request and writes the result to disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{RedlineError, Result};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::{PromptRenderer, REVISION};

/// Revision runs warmer than the checks to allow generative paraphrase
const REVISE_TEMPERATURE: f64 = 0.3;

#[derive(Serialize)]
struct RevisionContext<'a> {
    original_content: &'a str,
    evidence_feedback: &'a str,
    proofread_feedback: &'a str,
}

/// An agent that generates a revised document from the original plus
/// checker feedback
pub struct ReviserAgent {
    client: Arc<dyn LlmClient>,
    renderer: PromptRenderer,
}

impl ReviserAgent {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            renderer: PromptRenderer::new(),
        }
    }

    /// Generate the revised document. Structured response bodies are
    /// normalized to a single string; an all-non-text response yields an
    /// empty string.
    pub async fn revise(
        &self,
        original: &str,
        evidence_feedback: &str,
        proofread_feedback: &str,
    ) -> Result<String> {
        let context = RevisionContext {
            original_content: original,
            evidence_feedback,
            proofread_feedback,
        };
        let user = self.renderer.render_with(REVISION.user, &context)?;

        let request = CompletionRequest::new(REVISION.system)
            .with_user_message(user)
            .with_temperature(REVISE_TEMPERATURE);

        let response = self.client.complete(request).await?;
        Ok(response.text())
    }

    /// Overwrite-write `text` to `path` as UTF-8; creates the file if
    /// absent, truncates if present
    pub fn save(&self, text: &str, path: &Path) -> Result<()> {
        fs::write(path, text).map_err(|e| {
            RedlineError::Output(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionResponse, ContentBlock, MockLlmClient, ResponseContent};
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_revise_plain_string_response() {
        let mock = Arc::new(MockLlmClient::new());
        mock.push_text("# Revised\n\nThe sky is blue.");

        let agent = ReviserAgent::new(mock.clone());
        let revised = agent
            .revise("# Draft\n\nThe sky is green.", "sky is blue", "no issues found")
            .await
            .unwrap();

        assert_eq!(revised, "# Revised\n\nThe sky is blue.");
    }

    #[tokio::test]
    async fn test_revise_request_carries_all_inputs() {
        let mock = Arc::new(MockLlmClient::new());
        let agent = ReviserAgent::new(mock.clone());
        agent
            .revise("ORIGINAL TEXT", "EVIDENCE NOTES", "PROOFREAD NOTES")
            .await
            .unwrap();

        let request = mock.request(0).unwrap();
        assert_eq!(request.temperature, Some(REVISE_TEMPERATURE));
        assert_eq!(request.system, REVISION.system);
        let user = &request.messages[0].content;
        assert!(user.contains("ORIGINAL TEXT"));
        assert!(user.contains("EVIDENCE NOTES"));
        assert!(user.contains("PROOFREAD NOTES"));
    }

    #[tokio::test]
    async fn test_revise_mixed_segment_response() {
        let mock = Arc::new(MockLlmClient::new());
        mock.push_response(CompletionResponse {
            content: ResponseContent::Blocks(vec![
                ContentBlock::Text {
                    text: "# Revised\n".to_string(),
                },
                ContentBlock::Other(json!({"inlineData": {"mimeType": "image/png"}})),
                ContentBlock::Text {
                    text: "Body.".to_string(),
                },
            ]),
            ..Default::default()
        });

        let agent = ReviserAgent::new(mock.clone());
        let revised = agent.revise("original", "a", "b").await.unwrap();
        assert_eq!(revised, "# Revised\nBody.");
    }

    #[tokio::test]
    async fn test_revise_all_non_text_response() {
        let mock = Arc::new(MockLlmClient::new());
        mock.push_response(CompletionResponse {
            content: ResponseContent::Blocks(vec![ContentBlock::Other(json!({"noop": true}))]),
            ..Default::default()
        });

        let agent = ReviserAgent::new(mock.clone());
        let revised = agent.revise("original", "a", "b").await.unwrap();
        assert_eq!(revised, "");
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.md");

        let agent = ReviserAgent::new(Arc::new(MockLlmClient::new()));
        let text = "# Title\n\nCafé, naïve, 技術記事.\n";
        agent.save(text, &path).unwrap();

        let read_back = std::fs::read(&path).unwrap();
        assert_eq!(read_back, text.as_bytes());
    }

    #[test]
    fn test_save_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.md");
        std::fs::write(&path, "a much longer earlier version").unwrap();

        let agent = ReviserAgent::new(Arc::new(MockLlmClient::new()));
        agent.save("short", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_save_to_missing_directory_is_output_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.md");

        let agent = ReviserAgent::new(Arc::new(MockLlmClient::new()));
        let result = agent.save("text", &path);
        assert!(matches!(result, Err(RedlineError::Output(_))));
    }
}
