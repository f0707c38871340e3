//! HTTP server binary for findoc-analyzer.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalyzerConfig`, initialises logging, and serves the axum router.

use anyhow::{Context, Result};
use clap::Parser;
use findoc_analyzer::{server, AnalyzerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Serve on the default port
  findoc-server

  # Custom bind address and storage directory
  findoc-server --host 0.0.0.0 --port 9000 --storage-dir /var/tmp/findoc

  # Pin a provider and model
  findoc-server --provider openai --model gpt-4o-mini

ENDPOINTS:
  GET  /         Health check
  POST /analyze  multipart form: file (PDF, required), query (optional)

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY        OpenAI API key (preferred when several are set)
  ANTHROPIC_API_KEY     Anthropic API key
  FINDOC_LLM_PROVIDER   Override provider (openai, anthropic, ollama, …)
  FINDOC_MODEL          Override model ID
  SERPER_API_KEY        Optional: enables the web-search capability
"#;

/// Serve the financial document analyzer over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "findoc-server",
    version,
    about = "Analyze financial PDF documents with role-specialized LLM agents",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Bind address.
    #[arg(long, env = "FINDOC_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Bind port.
    #[arg(short, long, env = "FINDOC_PORT", default_value_t = 8000)]
    port: u16,

    /// Directory for per-request transient uploads.
    #[arg(long, env = "FINDOC_STORAGE_DIR", default_value = "data")]
    storage_dir: PathBuf,

    /// LLM model ID (e.g. gpt-4o-mini).
    #[arg(long, env = "FINDOC_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    /// Auto-detected from API key env vars if not set.
    #[arg(long, env = "FINDOC_LLM_PROVIDER")]
    provider: Option<String>,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "FINDOC_TEMPERATURE", default_value_t = 0.2)]
    temperature: f32,

    /// Max LLM output tokens per task.
    #[arg(long, env = "FINDOC_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// Per-LLM-call timeout in seconds.
    #[arg(long, env = "FINDOC_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Verbose logging (-v: debug, -vv: trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "findoc_analyzer=info,findoc_server=info",
        1 => "findoc_analyzer=debug,findoc_server=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut builder = AnalyzerConfig::builder()
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .api_timeout_secs(cli.api_timeout)
        .storage_dir(cli.storage_dir);
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(provider) = cli.provider {
        builder = builder.provider_name(provider);
    }
    let config = builder.build().context("invalid configuration")?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Financial Document Analyzer listening on {addr}");
    axum::serve(listener, server::router(Arc::new(config)))
        .await
        .context("server error")?;

    Ok(())
}
