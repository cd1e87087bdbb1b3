//! Verbatim Server
//!
//! HTTP front end for the string analysis service: accepts values, stores
//! their analysis, and serves exact lookups and filtered listings.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use verbatim_store::RecordRepository;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the HTTP server
///
/// Opens the configured store, builds the router, and serves until
/// interrupted with Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Verbatim server");
    info!("Bind address: {}", config.bind_addr());
    info!("Storage backend: {:?}", config.storage.backend);

    let repository = RecordRepository::new(config.open_store()?);
    let app = create_router(AppState::new(repository));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(config.open_store().is_ok());
    }
}
