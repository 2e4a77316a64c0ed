use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use textgen_rust::{
    GenerationSettings, History, PollConfig, Poller, TextGenerator,
    config::{self, Config},
    job::HttpJobApi,
    server,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Command-line arguments for the textgen binary.
#[derive(Parser, Debug)]
#[command(name = "textgen")]
#[command(about = "Text generation client and prediction relay")]
#[command(version)]
struct Args {
    /// Path to the YAML configuration file (defaults to $CONFIG_PATH, then config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Run the prediction relay (default)
    Serve,
    /// Generate text for a prompt through the configured relay
    Generate {
        /// Prompt words, joined with spaces
        #[arg(required = true, trailing_var_arg = true)]
        prompt: Vec<String>,
    },
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// One-shot generation against the configured relay. Ctrl-C stops polling.
async fn generate(config: Config, prompt: String) -> Result<()> {
    let api = Arc::new(HttpJobApi::new(&config.client)?);
    let poller = Poller::new(api, PollConfig::from(&config.client.poll));
    let generator = TextGenerator::new(poller);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling generation");
            on_ctrl_c.cancel();
        }
    });

    let mut history = History::new();
    let saved = generator
        .generate(&mut history, &prompt, GenerationSettings::default(), &cancel)
        .await?;

    println!("{}", saved.result);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first (before logging setup)
    let loaded = match &args.config {
        Some(path) => config::load_from(path).await,
        None => config::load().await,
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .json()
        .init();

    match args.command.unwrap_or(Command::Serve) {
        Command::Generate { prompt } => generate(config, prompt.join(" ")).await,
        Command::Serve => {
            info!("Starting textgen relay with log level: {}", log_level);
            server::run(config).await?;
            Ok(())
        }
    }
}
