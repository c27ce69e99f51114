//! LLM client trait and mock implementation
//!
//! Each call is independent; there is no conversation state between
//! requests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::types::{CompletionRequest, CompletionResponse, ResponseContent, Usage};

/// Stateless LLM client
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocks until the full response arrives)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// The configured model name
    fn model(&self) -> &str;

    /// Whether the client holds a credential
    fn is_ready(&self) -> bool;

    /// Cumulative token usage across all calls made by this client
    fn total_usage(&self) -> Usage {
        Usage::default()
    }
}

/// Mock LLM client for tests: returns scripted responses in order and
/// records every request it receives.
pub struct MockLlmClient {
    model: String,
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    /// Create a mock with no scripted responses; every call returns a
    /// default "mock response" text.
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain-text response
    pub fn push_text(&self, text: impl Into<String>) {
        self.push_response(CompletionResponse {
            content: ResponseContent::Text(text.into()),
            ..Default::default()
        });
    }

    /// Queue a full response
    pub fn push_response(&self, response: CompletionResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Number of completion calls made so far
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The nth recorded request
    pub fn request(&self, index: usize) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().get(index).cloned()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        let scripted = self.responses.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| CompletionResponse {
            content: ResponseContent::Text("mock response".to_string()),
            ..Default::default()
        }))
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        true
    }
}
