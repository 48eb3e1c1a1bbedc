//! PostgreSQL Asset Unit Adapter
//!
//! Implements `AssetUnitPort` on top of [`AssetUnitRepository`].

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckable, HealthCheckResult, PortError, RetryPolicy};
use domain_asset::{AssetUnit, AssetUnitPort, AssetUnitQuery};

use crate::repositories::AssetUnitRepository;

/// PostgreSQL-backed implementation of the AssetUnitPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::ConnectionFailed` -> `PortError::Connection` (retried)
/// - `DatabaseError::PoolExhausted` -> `PortError::ServiceUnavailable` (retried)
/// - Other errors -> returned on first failure
#[derive(Debug, Clone)]
pub struct PostgresAssetUnitAdapter {
    repository: AssetUnitRepository,
    pool: PgPool,
    retry: RetryPolicy,
}

impl PostgresAssetUnitAdapter {
    /// Creates a new adapter with the default retry policy
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AssetUnitRepository::new(pool.clone()),
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

impl DomainPort for PostgresAssetUnitAdapter {}

#[async_trait]
impl HealthCheckable for PostgresAssetUnitAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-asset-unit-adapter").await
    }
}

#[async_trait]
impl AssetUnitPort for PostgresAssetUnitAdapter {
    #[instrument(skip(self))]
    async fn query(&self, query: AssetUnitQuery) -> Result<Vec<AssetUnit>, PortError> {
        let repository = &self.repository;
        let query = &query;

        let rows = self
            .retry
            .run("asset_unit.scan", || async move {
                repository.scan(query).await.map_err(PortError::from)
            })
            .await?;

        debug!(count = rows.len(), "Scanned asset_unit");
        Ok(rows.into_iter().map(AssetUnit::from).collect())
    }

    #[instrument(skip(self, record), fields(asset_code = %record.asset_code, date = %record.date))]
    async fn put(&self, record: &AssetUnit) -> Result<(), PortError> {
        let repository = &self.repository;

        self.retry
            .run("asset_unit.upsert", || async move {
                repository.upsert(record).await.map_err(PortError::from)
            })
            .await
    }
}
