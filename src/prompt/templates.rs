//! Embedded prompt templates for the checker and reviser agents
//!
//! Each template is a (system instruction, user message) pair. The checker
//! templates instruct the model to answer with the exact sentinel phrase
//! when the document is clean; issue detection tests for that phrase by
//! substring containment, so the constant and the template text must
//! agree byte-for-byte.

/// Phrase a checker emits when the document is clean
pub const NO_ISSUES_SENTINEL: &str = "no issues found";

/// A fixed system/user prompt pair with {{placeholders}} in the user part
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub system: &'static str,
    pub user: &'static str,
}

/// Factual-accuracy check; takes {{content}}
pub const EVIDENCE_CHECK: PromptTemplate = PromptTemplate {
    system: "\
You are an expert reviewer of technical articles. Check the technical \
accuracy of the given text, evaluating it on these points:

1. Whether the stated technical facts are correct
2. Whether any wording is misleading
3. Whether it contains outdated or deprecated information
4. Whether anything is unclear or ambiguous

Report every finding in this format:
- Location: (quote the relevant passage)
- Issue: (the specific problem)
- Suggestion: (a fix or supporting information)

If there are no problems, respond with exactly \"no issues found\".",
    user: "{{content}}",
};

/// Style and grammar check; takes {{content}}
pub const PROOFREAD_CHECK: PromptTemplate = PromptTemplate {
    system: "\
You are an expert copy editor for technical articles. Check the given \
text on these points:

1. Typos and misspellings
2. Readability (redundant phrasing, awkward wording)
3. Appropriate use of technical terminology
4. Consistency of tone and style
5. Paragraph structure

Report every finding in this format:
- Location: (quote the relevant passage)
- Issue: (the specific problem)
- Correction: (the improved wording)

If there are no problems, respond with exactly \"no issues found\".",
    user: "{{content}}",
};

/// Revision; takes {{original_content}}, {{evidence_feedback}} and
/// {{proofread_feedback}}
pub const REVISION: PromptTemplate = PromptTemplate {
    system: "\
You are an expert editor of technical articles. Using the original \
article and the feedback from each reviewer, produce an improved version \
of the article.

Follow these rules:
1. Preserve the structure and format (markdown) of the original article
2. Ensure technical accuracy
3. Keep the text clear and easy to read
4. Address the reported problems
5. Do not change the intent of the original article

Return the complete improved article in markdown. Return only the \
article, with no commentary or explanation.",
    user: "\
Original article:
{{original_content}}

--- Feedback ---

[Factual accuracy feedback]
{{evidence_feedback}}

[Proofreading feedback]
{{proofread_feedback}}

---

Rewrite the article incorporating the feedback above.",
};
