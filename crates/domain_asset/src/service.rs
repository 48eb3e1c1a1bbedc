//! Asset unit application service
//!
//! Holds the two store ports and runs the read and write flows:
//!
//! - **Read**: scan `asset_unit` with optional filters
//! - **Write**: look up the daily price, reconcile unit and amount, upsert

use std::sync::Arc;

use tracing::{debug, info, instrument};

use core_kernel::{HealthCheckResult, PortError};

use crate::asset_unit::{AssetUnit, AssetUnitQuery, AssetUnitWriteRequest};
use crate::error::AssetUnitError;
use crate::ports::{AssetUnitPort, DailyPricePort};
use crate::reconcile::reconcile;

/// Service over the asset unit and daily price ports
#[derive(Clone)]
pub struct AssetUnitService {
    units: Arc<dyn AssetUnitPort>,
    prices: Arc<dyn DailyPricePort>,
}

impl AssetUnitService {
    /// Creates a new service
    ///
    /// # Arguments
    ///
    /// * `units` - Port for the `asset_unit` table
    /// * `prices` - Port for the `asset_daily` table
    pub fn new(units: Arc<dyn AssetUnitPort>, prices: Arc<dyn DailyPricePort>) -> Self {
        Self { units, prices }
    }

    /// Looks up the reference price of an asset on a date
    ///
    /// Returns `0` without touching the store when both keys are empty.
    ///
    /// # Errors
    ///
    /// The port's `NotFound` when no price row exists, or any store error
    #[instrument(skip(self))]
    pub async fn lookup_price(&self, asset_code: &str, date: &str) -> Result<i64, PortError> {
        if asset_code.is_empty() && date.is_empty() {
            return Ok(0);
        }
        let daily = self.prices.get(asset_code, date).await?;
        debug!(price = daily.price, "Reference price found");
        Ok(daily.price)
    }

    /// Lists records matching the query
    #[instrument(skip(self))]
    pub async fn query(&self, query: AssetUnitQuery) -> Result<Vec<AssetUnit>, AssetUnitError> {
        let records = self.units.query(query).await?;
        debug!(count = records.len(), "Asset units queried");
        Ok(records)
    }

    /// Derives the missing side of a write request and upserts the record
    ///
    /// A missing reference price rejects the write with `PriceNotFound`
    /// rather than reconciling at a price of zero.
    ///
    /// # Returns
    ///
    /// The stored record as a single-element list
    #[instrument(skip(self, request), fields(asset_code = %request.asset_code, date = %request.date))]
    pub async fn record(&self, request: AssetUnitWriteRequest) -> Result<Vec<AssetUnit>, AssetUnitError> {
        if request.asset_code.is_empty() {
            return Err(AssetUnitError::Validation("AssetCode must not be empty".to_string()));
        }
        if request.date.is_empty() {
            return Err(AssetUnitError::Validation("Date must not be empty".to_string()));
        }

        let price = match self.lookup_price(&request.asset_code, &request.date).await {
            Ok(price) => price,
            Err(e) if e.is_not_found() => {
                return Err(AssetUnitError::PriceNotFound {
                    asset_code: request.asset_code,
                    date: request.date,
                })
            }
            Err(e) => return Err(e.into()),
        };

        let (unit, amount) = reconcile(price, request.unit, request.amount)?;
        let record = AssetUnit::new(request.asset_code, request.date, unit, amount);
        self.units.put(&record).await?;

        info!(price, unit, amount, "Asset unit recorded");
        Ok(vec![record])
    }

    /// Runs the health checks of both ports
    pub async fn health_checks(&self) -> Vec<HealthCheckResult> {
        vec![
            self.units.health_check().await,
            self.prices.health_check().await,
        ]
    }
}
