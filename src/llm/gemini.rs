//! Google Gemini API client implementation
//!
//! Implements the LlmClient trait over the generateContent endpoint.
//! Candidate parts may carry non-text payloads (inline data, function
//! calls); those are surfaced as non-text segments and dropped when the
//! response is flattened.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RedlineError, Result};
use crate::llm::client::LlmClient;
use crate::llm::types::{
    CompletionRequest, CompletionResponse, ContentBlock, Provider, ResponseContent, Role,
    StopReason, Usage,
};

/// Gemini API base URL
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default max output tokens
const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: Provider::Gemini.default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(300),
        }
    }
}

impl GeminiConfig {
    /// Create a new config with a specific model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

// Wire types for the generateContent API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    parts: Vec<GeminiPart>,
}

/// A single content part; anything without a text field is non-text
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(flatten)]
    other: serde_json::Map<String, Value>,
}

impl GeminiPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            other: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: GeminiContent,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    config: GeminiConfig,
    usage: Arc<Mutex<Usage>>,
}

impl GeminiClient {
    /// Create a new client, reading GOOGLE_API_KEY from the environment
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let env_var = Provider::Gemini.api_key_env();
        let api_key = std::env::var(env_var)
            .map_err(|_| RedlineError::Config(format!("{} not set", env_var)))?;

        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RedlineError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
            usage: Arc::new(Mutex::new(Usage::default())),
        })
    }

    /// Build the request body for the generateContent API
    fn build_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: match m.role {
                    Role::User => "user".to_string(),
                    Role::Assistant => "model".to_string(),
                },
                parts: vec![GeminiPart::text(&m.content)],
            })
            .collect();

        let system_instruction = if request.system.is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart::text(&request.system)],
            })
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: Some(request.max_tokens.unwrap_or(self.config.max_tokens)),
                temperature: request.temperature,
            }),
        }
    }

    fn request_url(&self, request: &CompletionRequest) -> String {
        let model = request.model.as_deref().unwrap_or(&self.config.model);
        format!("{}/{}:generateContent?key={}", GEMINI_API_URL, model, self.api_key)
    }

    /// Parse the API response body into a CompletionResponse
    fn parse_response(&self, body: GeminiResponse) -> Result<CompletionResponse> {
        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| RedlineError::Provider("No candidates in response".to_string()))?;

        let stop_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => StopReason::MaxTokens,
            Some("STOP_SEQUENCE") => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        };

        let blocks = candidate
            .content
            .parts
            .into_iter()
            .map(|part| match part.text {
                Some(text) => ContentBlock::Text { text },
                None => ContentBlock::Other(Value::Object(part.other)),
            })
            .collect();

        let usage = body
            .usage_metadata
            .map(|u| Usage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        {
            let mut total = self.usage.lock().unwrap();
            total.add(&usage);
        }

        Ok(CompletionResponse {
            content: ResponseContent::Blocks(blocks),
            stop_reason,
            usage,
        })
    }

    /// Send a request to the API and decode the body
    async fn send_request(&self, url: &str, body: &GeminiRequest) -> Result<GeminiResponse> {
        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| RedlineError::Provider(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RedlineError::Provider(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<GeminiError>(&text) {
                return Err(RedlineError::Provider(format!(
                    "Gemini API error ({}): {}",
                    status, error.error.message
                )));
            }
            return Err(RedlineError::Provider(format!(
                "Gemini API error ({}): {}",
                status, text
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| RedlineError::Provider(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = self.request_url(&request);
        let body = self.build_request(&request);
        let response = self.send_request(&url, &body).await?;
        self.parse_response(response)
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn total_usage(&self) -> Usage {
        self.usage.lock().unwrap().clone()
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("max_tokens", &self.config.max_tokens)
            .finish()
    }
}
