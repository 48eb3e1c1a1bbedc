//! Daily price repository implementation
//!
//! Read-only access to the `asset_daily` table, which is written by a
//! companion pricing system.

use sqlx::PgPool;

use domain_asset::AssetDailyPrice;

use crate::error::DatabaseError;

/// Database row representation of a daily price
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyPriceRow {
    pub asset_code: String,
    pub date: String,
    pub price: i64,
}

impl From<DailyPriceRow> for AssetDailyPrice {
    fn from(row: DailyPriceRow) -> Self {
        AssetDailyPrice::new(row.asset_code, row.date, row.price)
    }
}

/// Repository for the `asset_daily` table
#[derive(Debug, Clone)]
pub struct DailyPriceRepository {
    pool: PgPool,
}

impl DailyPriceRepository {
    /// Creates a new DailyPriceRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves the price of an asset on a date
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` when no row has the key `(asset_code, date)`
    pub async fn get(&self, asset_code: &str, date: &str) -> Result<DailyPriceRow, DatabaseError> {
        sqlx::query_as::<_, DailyPriceRow>(
            r#"
            SELECT asset_code, "date", price
            FROM asset_daily
            WHERE asset_code = $1 AND "date" = $2
            "#,
        )
        .bind(asset_code)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("AssetDailyPrice", format!("{}/{}", asset_code, date)))
    }
}
