//! VNPay return-URL verifier.
//!
//! Receives VNPay payment callbacks and answers whether their
//! `vnp_SecureHash` signature is authentic.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// VNPay callback verifier - checks HMAC-SHA512 signatures on return URLs
#[derive(Parser)]
#[command(name = "vnpay-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// VNPay hash secret; overrides `[vnpay].hash_secret` from the file
    #[arg(long, env = "VNPAY_HASH_SECRET", hide_env_values = true)]
    hash_secret: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting vnpay-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration; a missing or empty secret stops startup here
    let config_loader = ConfigLoader::new(args.config.as_ref(), args.listen, args.hash_secret);
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    match &args.config {
        Some(path) => tracing::info!("Configuration loaded from {:?}", path),
        None => tracing::info!("No configuration file given, using defaults and environment"),
    }

    let listen_addr = loaded_config.listen;

    // Create application state
    let state = AppState::new(loaded_config.secret);

    // Build the router
    tracing::info!("Serving VNPay return URL at {}", loaded_config.return_path);
    let router = build_router(state, &loaded_config.return_path);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
