//! Command-line harness for the Ambrosus gateway client.
//!
//! Every operation prints its envelope as pretty JSON: the success body on
//! stdout and exit code 0, or the failure envelope and exit code 1 when the
//! gateway (or client-side validation) rejects.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ambrosus_client::{AmbrosusClient, Settings};

mod commands;
use commands::{AssetCommand, EventCommand};

#[derive(Parser)]
#[command(name = "amb")]
#[command(about = "Ambrosus gateway client")]
#[command(version)]
struct Cli {
    /// Gateway endpoint (defaults to the public test gateway)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Account secret, required for create operations
    #[arg(long, global = true)]
    secret: Option<String>,

    /// Account address (derived from the secret when omitted)
    #[arg(long, global = true)]
    address: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Asset operations
    #[command(subcommand)]
    Asset(AssetCommand),

    /// Event operations
    #[command(subcommand)]
    Event(EventCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Dispatch a command; the returned flag is whether the envelope was a
/// success.
async fn run(cli: Cli) -> Result<bool> {
    let mut settings = Settings::default();
    if let Some(endpoint) = cli.endpoint {
        settings.api_endpoint = endpoint;
    }
    settings.secret = cli.secret;
    settings.address = cli.address;

    let client = AmbrosusClient::new(settings);

    match cli.command {
        Commands::Asset(cmd) => commands::run_asset(&client, cmd).await,
        Commands::Event(cmd) => commands::run_event(&client, cmd).await,
    }
}
