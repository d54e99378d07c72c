use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pc_copilot::{
    constants::*, util::default_http_client, ChatRequest, Client, Credential, EndpointConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Chat with the GitHub Copilot API")]
struct Args {
    #[arg(
        short = 't',
        long,
        help = "GitHub token to use. If not provided, GITHUB_TOKEN is read from the environment."
    )]
    token: Option<String>,

    #[arg(short = 'm', long, default_value = DEFAULT_MODEL, help = "Model to use for chat completion")]
    model: String,

    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, help = "Sampling temperature (0-2)")]
    temperature: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS, help = "Maximum tokens to generate")]
    max_tokens: u32,

    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Per-request timeout in seconds"
    )]
    timeout: u64,

    #[arg(
        long,
        help = "Endpoint to exchange the GitHub token at. Defaults to the GitHub API."
    )]
    token_endpoint: Option<String>,

    #[arg(
        long,
        help = "Endpoint to request chat completions from. Defaults to the Copilot API."
    )]
    completion_endpoint: Option<String>,

    #[arg(long, help = "Also print the full completion response as JSON")]
    json: bool,

    #[arg(help = "Message to send to Copilot. Defaults to a short greeting.")]
    message: Vec<String>,
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let credential = Credential::resolve(args.token.as_deref())?;

    let mut builder = ChatRequest::builder();
    builder
        .model(args.model)
        .temperature(args.temperature)
        .max_tokens(args.max_tokens);
    if !args.message.is_empty() {
        builder.message(args.message.join(" "));
    }
    let request = builder.build().context("invalid chat request")?;

    let http = default_http_client(Some(Duration::from_secs(args.timeout)))
        .context("failed to build the HTTP client")?;
    let endpoints = EndpointConfig {
        token: args.token_endpoint,
        completion: args.completion_endpoint,
    };
    let client = Client::new(http, Some(endpoints), credential)?;

    println!("Step 1: Getting Copilot token from GitHub API...");
    let progress = spinner("waiting for the token service");
    let token = client.exchange_token().await;
    progress.finish_and_clear();
    let token = token.context("failed to get Copilot token")?;
    println!("✓ Successfully obtained Copilot token\n");

    println!(
        "Step 2: Making chat completion request with {} model...",
        request.model
    );
    println!("User: {}\n", request.message);
    let progress = spinner("waiting for the completion service");
    let response = client.complete(&token, &request).await;
    progress.finish_and_clear();
    let response = response.context("failed to get chat completion")?;

    println!("Assistant: {}\n", response.answer);
    if let Some(usage) = response.usage {
        println!("Token usage: {}", usage);
    }
    println!("\n✓ Request completed successfully");

    if args.json {
        println!("{}", serde_json::to_string_pretty(response.raw())?);
    }

    Ok(())
}
