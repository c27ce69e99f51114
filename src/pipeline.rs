//! Pipeline driver - the linear review-and-revise flow
//!
//! read input → evidence check → proofread check → revise → write output.
//! Each step is a single blocking call; any completion-client error
//! propagates immediately and no step is re-entered.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::*;
use log::info;

use crate::agents::{CheckResult, CheckerAgent, ReviserAgent};
use crate::error::{RedlineError, Result};
use crate::llm::LlmClient;

/// Outcome of a full pipeline run
#[derive(Debug)]
pub struct PipelineReport {
    pub evidence: CheckResult,
    pub proofread: CheckResult,
    pub output_path: PathBuf,
}

impl PipelineReport {
    /// Whether either checker flagged issues
    pub fn any_issues(&self) -> bool {
        self.evidence.has_issues || self.proofread.has_issues
    }
}

/// The three agents sharing one completion client
pub struct Pipeline {
    evidence: CheckerAgent,
    proofread: CheckerAgent,
    reviser: ReviserAgent,
}

impl Pipeline {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            evidence: CheckerAgent::evidence(client.clone()),
            proofread: CheckerAgent::proofread(client.clone()),
            reviser: ReviserAgent::new(client),
        }
    }

    /// Run the full pipeline on `input`, writing the revised document to
    /// `output` (or the default path next to the input). With `verbose`,
    /// each checker's raw feedback is printed right after its call.
    pub async fn run(
        &self,
        input: &Path,
        output: Option<&Path>,
        verbose: bool,
    ) -> Result<PipelineReport> {
        println!("{} {}", "Reading:".cyan(), input.display());
        let content = read_input(input)?;
        info!("Read {} bytes from {}", content.len(), input.display());

        println!("{}", "Checking factual accuracy...".cyan());
        let evidence = self.evidence.check(&content).await?;
        if verbose {
            print_feedback(self.evidence.name(), &evidence);
        }

        println!("{}", "Proofreading...".cyan());
        let proofread = self.proofread.check(&content).await?;
        if verbose {
            print_feedback(self.proofread.name(), &proofread);
        }

        println!("{}", "Generating revised document...".cyan());
        let revised = self
            .reviser
            .revise(&content, &evidence.result_text, &proofread.result_text)
            .await?;

        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input),
        };

        println!("{} {}", "Saving:".cyan(), output_path.display());
        self.reviser.save(&revised, &output_path)?;
        info!("Wrote {} bytes to {}", revised.len(), output_path.display());

        Ok(PipelineReport {
            evidence,
            proofread,
            output_path,
        })
    }
}

fn print_feedback(name: &str, result: &CheckResult) {
    println!("\n--- {} feedback ---", name.bold());
    println!("{}\n", result.result_text);
}

/// Read the input document, rejecting missing, unreadable, or empty files
/// before any remote call is made
fn read_input(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .map_err(|e| RedlineError::Input(format!("Failed to read {}: {}", path.display(), e)))?;

    if content.trim().is_empty() {
        return Err(RedlineError::Input(format!(
            "Input file {} is empty",
            path.display()
        )));
    }

    Ok(content)
}

/// Default output path: `{stem}_revised{suffix}` alongside the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_revised.{}", stem, ext),
        None => format!("{}_revised", stem),
    };

    input.with_file_name(name)
}
