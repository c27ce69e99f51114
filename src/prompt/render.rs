//! Prompt Renderer - Render templates with context variables using Handlebars

use std::collections::HashMap;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{RedlineError, Result};

/// Renders prompt templates using Handlebars templating
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    /// Create a new PromptRenderer with default settings
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Variables are substituted verbatim: no strict-mode errors,
        // no HTML escaping
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render a template string with the given context
    pub fn render(&self, template: &str, context: &HashMap<String, String>) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| RedlineError::Template(format!("Failed to render template: {}", e)))
    }

    /// Render a template string with any serializable context
    pub fn render_with<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| RedlineError::Template(format!("Failed to render template: {}", e)))
    }
}
