//! Checker agents: submit a document to a fixed prompt and classify the
//! feedback
//!
//! Two instances exist: the evidence checker (factual accuracy) and the
//! proofread checker (style and grammar). They differ only in name and
//! template.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::{EVIDENCE_CHECK, NO_ISSUES_SENTINEL, PROOFREAD_CHECK, PromptRenderer, PromptTemplate};

/// Checkers run deterministic-leaning
const CHECK_TEMPERATURE: f64 = 0.0;

/// Result of a single checker run
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub agent_name: String,
    pub result_text: String,
    pub has_issues: bool,
}

/// An agent that submits a document to its template and an LLM, returning
/// free-text feedback plus a derived issue flag
pub struct CheckerAgent {
    name: &'static str,
    template: PromptTemplate,
    client: Arc<dyn LlmClient>,
    renderer: PromptRenderer,
}

impl CheckerAgent {
    /// Factual-accuracy checker
    pub fn evidence(client: Arc<dyn LlmClient>) -> Self {
        Self {
            name: "evidence",
            template: EVIDENCE_CHECK,
            client,
            renderer: PromptRenderer::new(),
        }
    }

    /// Style/grammar checker
    pub fn proofread(client: Arc<dyn LlmClient>) -> Self {
        Self {
            name: "proofread",
            template: PROOFREAD_CHECK,
            client,
            renderer: PromptRenderer::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Check the document and classify the response
    pub async fn check(&self, content: &str) -> Result<CheckResult> {
        let mut context = HashMap::new();
        context.insert("content".to_string(), content.to_string());
        let user = self.renderer.render(self.template.user, &context)?;

        let request = CompletionRequest::new(self.template.system)
            .with_user_message(user)
            .with_temperature(CHECK_TEMPERATURE);

        let response = self.client.complete(request).await?;
        let result_text = response.text();
        let has_issues = classify(&result_text);

        log::debug!("{} check: has_issues={}", self.name, has_issues);

        Ok(CheckResult {
            agent_name: self.name.to_string(),
            result_text,
            has_issues,
        })
    }
}

/// A response has issues iff the exact sentinel phrase is absent.
/// Known limitation: this is a case-sensitive substring test against
/// free-form model output, so a differently-worded clean verdict reads
/// as an issue and a quoted sentinel reads as clean.
fn classify(result_text: &str) -> bool {
    !result_text.contains(NO_ISSUES_SENTINEL)
}
