//! Prompt System - embedded templates and Handlebars rendering

mod render;
mod templates;

pub use render::PromptRenderer;
pub use templates::{
    EVIDENCE_CHECK, NO_ISSUES_SENTINEL, PROOFREAD_CHECK, PromptTemplate, REVISION,
};
