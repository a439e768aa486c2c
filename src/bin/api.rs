//! Checkin API Server
//!
//! Run with: cargo run --bin checkin-api
//!
//! # Configuration
//!
//! Read from `--config`, or the default locations (see `Config::load_default`).
//! Environment variables:
//! - `CHECKIN_DATA_DIR`: Data directory
//! - `CHECKIN_STORE_BACKEND`: `log` or `sqlite` (default: log)
//! - `CHECKIN_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `CHECKIN_API_PORT`: Port to listen on (default: 8083)
//! - `RUST_LOG`: Log filter (default: checkin=info)

use checkin::api::{serve, AppState};
use checkin::config::Config;
use checkin::store::open_store;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checkin-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Record store server for daily check-ins")]
struct Args {
    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::resolve(args.config.as_deref())?;

    checkin::logging::init(&config.logging);
    config.log_source();

    tracing::info!("Starting Checkin API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {:?}", config.store.data_dir);

    let store = open_store(&config.store)?;

    let state = AppState::new(store.clone(), config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("Flushing record store...");
    store.flush().await?;
    tracing::info!("Checkin API server stopped");

    Ok(())
}
