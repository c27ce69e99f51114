//! Redline - LLM-assisted document review and revision
//!
//! Reads a markdown document, runs it through a factual-accuracy check
//! and a style/grammar check against an LLM provider, then generates a
//! revised document incorporating both sets of feedback.

pub mod agents;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompt;

pub use error::{RedlineError, Result};
