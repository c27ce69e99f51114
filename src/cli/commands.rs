//! CLI definition using clap.

use clap::Parser;
use std::path::PathBuf;

use redline::llm::Provider;

/// Redline - LLM-assisted document review and revision
///
/// Reads a markdown file, checks it for factual accuracy and readability,
/// then generates an improved version.
#[derive(Parser, Debug)]
#[command(name = "redline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Markdown file to review
    pub input: PathBuf,

    /// Output file path (default: {input}_revised{suffix} next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// API key (falls back to the selected provider's environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// LLM provider
    #[arg(short, long, value_enum, default_value_t = Provider::OpenAi)]
    pub provider: Provider,

    /// Model name (default depends on provider)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Show detailed feedback from the checker agents
    #[arg(short, long)]
    pub verbose: bool,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
