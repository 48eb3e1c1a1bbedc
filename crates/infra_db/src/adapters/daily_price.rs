//! PostgreSQL Daily Price Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{DomainPort, HealthCheckable, HealthCheckResult, PortError, RetryPolicy};
use domain_asset::{AssetDailyPrice, DailyPricePort};

use crate::repositories::DailyPriceRepository;

/// PostgreSQL-backed implementation of the DailyPricePort trait
///
/// A missing row surfaces as `PortError::NotFound` and is never retried.
#[derive(Debug, Clone)]
pub struct PostgresDailyPriceAdapter {
    repository: DailyPriceRepository,
    pool: PgPool,
    retry: RetryPolicy,
}

impl PostgresDailyPriceAdapter {
    /// Creates a new adapter with the default retry policy
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DailyPriceRepository::new(pool.clone()),
            pool,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl DomainPort for PostgresDailyPriceAdapter {}

#[async_trait]
impl HealthCheckable for PostgresDailyPriceAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-daily-price-adapter").await
    }
}

#[async_trait]
impl DailyPricePort for PostgresDailyPriceAdapter {
    #[instrument(skip(self))]
    async fn get(&self, asset_code: &str, date: &str) -> Result<AssetDailyPrice, PortError> {
        let repository = &self.repository;

        let row = self
            .retry
            .run("asset_daily.get", || async move {
                repository.get(asset_code, date).await.map_err(PortError::from)
            })
            .await?;

        Ok(row.into())
    }
}
