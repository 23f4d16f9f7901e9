//! Batch quality records service
//!
//! Serves the JSON API for projects, batches and their compliance documents.

use batch_quality::server;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "quality-server", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(
        short,
        long,
        env = "QUALITY_CONFIG",
        default_value = "config/quality.yaml"
    )]
    config: PathBuf,

    /// Override the configured bind host
    #[arg(long, env = "QUALITY_HOST")]
    host: Option<String>,

    /// Override the configured port
    #[arg(short, long, env = "QUALITY_PORT")]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, env = "QUALITY_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .init();
    }

    match server::run_server(&args.config, args.host, args.port).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the multi-line bind hints readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
