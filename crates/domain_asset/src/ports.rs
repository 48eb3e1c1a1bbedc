//! Asset Domain Ports
//!
//! This module defines the store interfaces the asset unit domain depends on,
//! enabling swappable implementations (PostgreSQL, in-memory mock).
//!
//! # Architecture
//!
//! Two independently keyed tables back the ledger:
//!
//! - **`asset_unit`**: holdings, read by scan and written by upsert ([`AssetUnitPort`])
//! - **`asset_daily`**: reference prices, read by composite key ([`DailyPricePort`])
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_asset::{AssetUnitPort, DailyPricePort, AssetUnitService};
//! use std::sync::Arc;
//!
//! let units: Arc<dyn AssetUnitPort> = Arc::new(PostgresAssetUnitAdapter::new(pool.clone()));
//! let prices: Arc<dyn DailyPricePort> = Arc::new(PostgresDailyPriceAdapter::new(pool));
//! let service = AssetUnitService::new(units, prices);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::asset_unit::{AssetUnit, AssetUnitQuery};
use crate::daily_price::AssetDailyPrice;

/// Port for the `asset_unit` table
#[async_trait]
pub trait AssetUnitPort: DomainPort + HealthCheckable {
    /// Scans every record, keeping those that match the query's filters
    ///
    /// No pagination and no ordering beyond the store's natural order.
    async fn query(&self, query: AssetUnitQuery) -> Result<Vec<AssetUnit>, PortError>;

    /// Upserts a record keyed by `(asset_code, date)`
    ///
    /// An existing record with the same key is replaced in full.
    async fn put(&self, record: &AssetUnit) -> Result<(), PortError>;
}

/// Port for the `asset_daily` table
#[async_trait]
pub trait DailyPricePort: DomainPort + HealthCheckable {
    /// Gets the price row for `(asset_code, date)`
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` when no row has that key
    async fn get(&self, asset_code: &str, date: &str) -> Result<AssetDailyPrice, PortError>;
}

/// In-memory mock implementations of the asset ports for testing
///
/// Records keep insertion order, which stands in for a store's natural scan order.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of AssetUnitPort
    #[derive(Debug, Default)]
    pub struct MockAssetUnitPort {
        records: Arc<RwLock<Vec<AssetUnit>>>,
        unavailable: AtomicBool,
    }

    impl MockAssetUnitPort {
        /// Creates a new empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with records for testing
        pub async fn with_records(records: Vec<AssetUnit>) -> Self {
            let port = Self::new();
            for record in records {
                port.put(&record).await.ok();
            }
            port
        }

        /// Makes every subsequent call fail with `ServiceUnavailable`
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Returns a snapshot of the stored records
        pub async fn records(&self) -> Vec<AssetUnit> {
            self.records.read().await.clone()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock asset_unit".to_string(),
                });
            }
            Ok(())
        }
    }

    impl DomainPort for MockAssetUnitPort {}

    #[async_trait]
    impl HealthCheckable for MockAssetUnitPort {
        async fn health_check(&self) -> HealthCheckResult {
            let healthy = !self.unavailable.load(Ordering::SeqCst);
            HealthCheckResult {
                adapter_id: "mock-asset-unit-port".to_string(),
                status: if healthy { AdapterHealth::Healthy } else { AdapterHealth::Unhealthy },
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl AssetUnitPort for MockAssetUnitPort {
        async fn query(&self, query: AssetUnitQuery) -> Result<Vec<AssetUnit>, PortError> {
            self.check_available()?;
            let records = self.records.read().await;
            Ok(records.iter().filter(|r| query.matches(r)).cloned().collect())
        }

        async fn put(&self, record: &AssetUnit) -> Result<(), PortError> {
            self.check_available()?;
            let mut records = self.records.write().await;
            match records
                .iter_mut()
                .find(|r| r.asset_code == record.asset_code && r.date == record.date)
            {
                Some(existing) => *existing = record.clone(),
                None => records.push(record.clone()),
            }
            Ok(())
        }
    }

    /// In-memory mock implementation of DailyPricePort
    #[derive(Debug, Default)]
    pub struct MockDailyPricePort {
        prices: Arc<RwLock<HashMap<(String, String), AssetDailyPrice>>>,
    }

    impl MockDailyPricePort {
        /// Creates a new empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with prices for testing
        pub async fn with_prices(prices: Vec<AssetDailyPrice>) -> Self {
            let port = Self::new();
            for price in prices {
                port.insert(price).await;
            }
            port
        }

        /// Inserts or replaces a price
        pub async fn insert(&self, price: AssetDailyPrice) {
            self.prices
                .write()
                .await
                .insert((price.asset_code.clone(), price.date.clone()), price);
        }
    }

    impl DomainPort for MockDailyPricePort {}

    #[async_trait]
    impl HealthCheckable for MockDailyPricePort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-daily-price-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl DailyPricePort for MockDailyPricePort {
        async fn get(&self, asset_code: &str, date: &str) -> Result<AssetDailyPrice, PortError> {
            self.prices
                .read()
                .await
                .get(&(asset_code.to_string(), date.to_string()))
                .cloned()
                .ok_or_else(|| PortError::not_found("AssetDailyPrice", format!("{}/{}", asset_code, date)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::{MockAssetUnitPort, MockDailyPricePort};

    fn sample_records() -> Vec<AssetUnit> {
        vec![
            AssetUnit::new("JP001", "2024-01-01", 20000, 10000),
            AssetUnit::new("JP001", "2024-01-02", 10000, 5100),
            AssetUnit::new("JP002", "2024-01-01", 5000, 700),
        ]
    }

    #[tokio::test]
    async fn test_query_without_filters_returns_everything() {
        let port = MockAssetUnitPort::with_records(sample_records()).await;
        let found = port.query(AssetUnitQuery::all()).await.unwrap();
        assert_eq!(found, sample_records());
    }

    #[tokio::test]
    async fn test_query_filters() {
        let port = MockAssetUnitPort::with_records(sample_records()).await;

        let by_code = port.query(AssetUnitQuery::by_asset_code("JP001")).await.unwrap();
        assert_eq!(by_code.len(), 2);
        assert!(by_code.iter().all(|r| r.asset_code == "JP001"));

        let by_date = port
            .query(AssetUnitQuery::new(None, Some("2024-01-01".to_string())))
            .await
            .unwrap();
        assert_eq!(by_date.len(), 2);

        let both = port
            .query(AssetUnitQuery::by_asset_code("JP001").on_date("2024-01-01"))
            .await
            .unwrap();
        assert_eq!(both, vec![AssetUnit::new("JP001", "2024-01-01", 20000, 10000)]);
    }

    #[tokio::test]
    async fn test_put_replaces_in_full() {
        let port = MockAssetUnitPort::with_records(sample_records()).await;

        port.put(&AssetUnit::new("JP001", "2024-01-01", 1, 0)).await.unwrap();

        let records = port.records().await;
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], AssetUnit::new("JP001", "2024-01-01", 1, 0));
    }

    #[tokio::test]
    async fn test_unavailable_port_fails() {
        let port = MockAssetUnitPort::new();
        port.set_unavailable(true);

        let err = port.query(AssetUnitQuery::all()).await.unwrap_err();
        assert!(err.is_transient());
        assert!(!port.health_check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_price_port_not_found() {
        let port = MockDailyPricePort::with_prices(vec![
            AssetDailyPrice::new("JP001", "2024-01-01", 5000),
        ])
        .await;

        assert_eq!(port.get("JP001", "2024-01-01").await.unwrap().price, 5000);
        assert!(port.get("JP001", "2024-01-02").await.unwrap_err().is_not_found());
    }
}
