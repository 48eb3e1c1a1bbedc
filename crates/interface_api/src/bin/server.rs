//! Asset Unit API - Server Binary
//!
//! This binary starts the HTTP API server for the asset unit ledger.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin asset-unit-api
//!
//! # Run with environment variables
//! API_PORT=8080 ALLOW_ORIGIN=https://app.example.com DATABASE_URL=postgres://... cargo run --bin asset-unit-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_ALLOW_ORIGIN` / `ALLOW_ORIGIN` - Value of `Access-Control-Allow-Origin`
//! * `API_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_STORE_MAX_RETRIES` - Retries for transient store failures (default: 3)
//! * `API_STORE_RETRY_DELAY_MS` - Backoff base between retries (default: 100)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_asset::AssetUnitService;
use infra_db::{create_pool, PostgresAssetUnitAdapter, PostgresDailyPriceAdapter};
use interface_api::{create_router, config::ApiConfig};

/// Main entry point for the API server.
///
/// Loads configuration, initializes logging, wires the store adapters into
/// the service, and serves until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The connection pool cannot be configured
/// - The configured origin is not a valid header value
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Asset Unit API Server"
    );

    let pool = create_pool(config.database_config()).context("failed to create database pool")?;

    let retry = config.retry_policy();
    let units = PostgresAssetUnitAdapter::new(pool.clone()).with_retry(retry);
    let prices = PostgresDailyPriceAdapter::new(pool).with_retry(retry);
    let service = AssetUnitService::new(Arc::new(units), Arc::new(prices));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let app = create_router(service, config).context("invalid ALLOW_ORIGIN value")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
