use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod cli;
mod config;

use cli::Cli;
use config::Config;
use redline::llm::{GeminiClient, GeminiConfig, LlmClient, OpenAiClient, OpenAiConfig, Provider};
use redline::pipeline::Pipeline;

fn setup_logging(level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("redline")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("redline.log");

    // Setup env_logger with file output; RUST_LOG overrides the config level
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Resolve the API key from the flag or the provider's environment
/// variable. Runs before any file or network I/O.
fn resolve_api_key(cli: &Cli) -> Result<String> {
    if let Some(key) = &cli.api_key {
        if !key.is_empty() {
            return Ok(key.clone());
        }
    }

    let env_var = cli.provider.api_key_env();
    match std::env::var(env_var) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => bail!(
            "API key is required: set the {} environment variable or use --api-key",
            env_var
        ),
    }
}

fn build_client(cli: &Cli, config: &Config, api_key: String) -> Result<Arc<dyn LlmClient>> {
    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| config.llm.model_for(cli.provider).to_string());
    let timeout = Duration::from_millis(config.llm.timeout_ms);

    let client: Arc<dyn LlmClient> = match cli.provider {
        Provider::OpenAi => {
            let mut provider_config = OpenAiConfig::with_model(model);
            provider_config.max_tokens = config.llm.max_tokens;
            provider_config.timeout = timeout;
            Arc::new(OpenAiClient::with_api_key(api_key, provider_config)?)
        }
        Provider::Gemini => {
            let mut provider_config = GeminiConfig::with_model(model);
            provider_config.max_tokens = config.llm.max_tokens;
            provider_config.timeout = timeout;
            Arc::new(GeminiClient::with_api_key(api_key, provider_config)?)
        }
    };

    Ok(client)
}

fn verdict_label(has_issues: bool) -> &'static str {
    if has_issues { "Issues found" } else { "No issues" }
}

fn verdict(has_issues: bool) -> ColoredString {
    let label = verdict_label(has_issues);
    if has_issues { label.yellow() } else { label.green() }
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    // Credential resolution comes first: a missing key fails before the
    // input file is read or any remote call is made
    let api_key = resolve_api_key(cli)?;
    let client = build_client(cli, config, api_key)?;
    info!("Using provider {} with model {}", cli.provider, client.model());

    let pipeline = Pipeline::new(client.clone());
    let report = pipeline
        .run(&cli.input, cli.output.as_deref(), cli.is_verbose())
        .await?;

    let usage = client.total_usage();
    info!(
        "Token usage: {} input, {} output",
        usage.input_tokens, usage.output_tokens
    );

    println!("\n{}", "Summary:".bold());
    println!("  - Evidence check: {}", verdict(report.evidence.has_issues));
    println!("  - Proofread check: {}", verdict(report.proofread.has_issues));
    println!("  - Output saved to: {}", report.output_path.display());

    if !cli.is_verbose() && report.any_issues() {
        println!("\nUse --verbose to see detailed feedback from the checkers");
    }

    Ok(())
}


#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging
    let level = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    setup_logging(&level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await?;

    Ok(())
}
