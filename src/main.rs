//! Interviewer API Server
//!
//! Run with: cargo run --bin interviewer
//!
//! Configuration is read from `--config <path>` or the default locations
//! (see [`interviewer::config`]); `RUST_LOG` overrides the configured level.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use interviewer::api::{serve, AppState};
use interviewer::config::{generate_default_config, Config};
use interviewer::storage::CandidateStore;

#[derive(Parser)]
#[command(name = "interviewer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "REST backend for structured candidate interviews")]
struct Args {
    /// Config file (default: ~/.config/interviewer/config.toml, /etc/interviewer/config.toml, ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a commented default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    interviewer::logging::init(&config.logging);

    tracing::info!("Starting Interviewer API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.storage.database_path);
    tracing::info!("PDF renderer: {}", config.export.chromium_path);

    let store = Arc::new(CandidateStore::open(Path::new(&config.storage.database_path))?);
    tracing::info!("{} candidates on file", store.count().await?);

    let api_config = config.api.clone();
    let state = AppState::new(store, config);

    serve(state, &api_config).await?;

    tracing::info!("Interviewer API server stopped");
    Ok(())
}
