//! Domain Adapters
//!
//! This module provides adapter implementations for the `domain_asset` ports,
//! connecting them to the PostgreSQL repositories.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Retries transient failures under a [`RetryPolicy`](core_kernel::RetryPolicy)
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresDailyPriceAdapter;
//! use domain_asset::DailyPricePort;
//!
//! let adapter = PostgresDailyPriceAdapter::new(pool);
//! let price = adapter.get("JP001", "2024-01-01").await?;
//! ```

pub mod asset_unit;
pub mod daily_price;

pub use asset_unit::PostgresAssetUnitAdapter;
pub use daily_price::PostgresDailyPriceAdapter;

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult};

/// Checks database connectivity with `SELECT 1`
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        },
        Err(e) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(format!("Database error: {}", e)),
            checked_at: Utc::now(),
        },
    }
}
