//! Asset unit repository implementation
//!
//! Database access for the `asset_unit` table: filtered scans and
//! key-based upserts.

use sqlx::PgPool;

use domain_asset::{AssetUnit, AssetUnitQuery};

use crate::error::DatabaseError;

/// Database row representation of an asset unit
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssetUnitRow {
    pub asset_code: String,
    pub date: String,
    pub unit: i64,
    pub amount: i64,
}

impl From<AssetUnitRow> for AssetUnit {
    fn from(row: AssetUnitRow) -> Self {
        AssetUnit::new(row.asset_code, row.date, row.unit, row.amount)
    }
}

/// Repository for the `asset_unit` table
#[derive(Debug, Clone)]
pub struct AssetUnitRepository {
    pool: PgPool,
}

impl AssetUnitRepository {
    /// Creates a new AssetUnitRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Scans the table, applying the query's equality filters
    ///
    /// An unset filter binds `NULL` and matches every row.
    pub async fn scan(&self, query: &AssetUnitQuery) -> Result<Vec<AssetUnitRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AssetUnitRow>(
            r#"
            SELECT asset_code, "date", unit, amount
            FROM asset_unit
            WHERE ($1::text IS NULL OR asset_code = $1)
              AND ($2::text IS NULL OR "date" = $2)
            "#,
        )
        .bind(query.asset_code.as_deref())
        .bind(query.date.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a record, replacing unit and amount of any row with the same key
    pub async fn upsert(&self, record: &AssetUnit) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO asset_unit (asset_code, "date", unit, amount)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (asset_code, "date")
            DO UPDATE SET unit = EXCLUDED.unit, amount = EXCLUDED.amount
            "#,
        )
        .bind(&record.asset_code)
        .bind(&record.date)
        .bind(record.unit)
        .bind(record.amount)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
