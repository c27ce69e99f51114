//! LLM Client Layer - provider adapters over remote completion APIs
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for provider abstraction
//! - OpenAiClient and GeminiClient implementations
//! - MockLlmClient for tests

pub mod client;
pub mod gemini;
pub mod openai;
pub mod types;

pub use client::{LlmClient, MockLlmClient};
pub use gemini::{GeminiClient, GeminiConfig};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, Provider, ResponseContent, Role,
    StopReason, Usage,
};
