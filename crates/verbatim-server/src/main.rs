//! Verbatim Server CLI
//!
//! Starts the HTTP server for string analysis and filtering.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use verbatim_server::{config::ServerConfig, init_tracing, start_server};

/// Verbatim - String Analysis Service
#[derive(Debug, Parser)]
#[command(name = "verbatim-server", version, about)]
struct Args {
    /// Load configuration from TOML file
    #[arg(short, long, env = "VERBATIM_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind_address: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(address) = args.bind_address {
        config.bind_address = address;
    }
    if let Some(port) = args.port {
        config.bind_port = port;
    }

    init_tracing(&config.log_filter);
    if args.config.is_none() {
        tracing::warn!("No config file specified, using in-memory storage");
    }

    start_server(config).await?;

    Ok(())
}
