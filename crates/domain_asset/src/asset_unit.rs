//! Asset unit holdings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A holding of one asset on one date
///
/// Keyed by `(asset_code, date)`. Serialized with the ledger's PascalCase
/// field names (`AssetCode`, `Date`, `Unit`, `Amount`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetUnit {
    /// Asset identifier
    pub asset_code: String,
    /// Holding date, kept as an opaque comparable string
    pub date: String,
    /// Units held, scaled by [`crate::UNIT_SCALE`]
    pub unit: i64,
    /// Monetary amount in whole currency units
    pub amount: i64,
}

impl AssetUnit {
    /// Creates a new asset unit record
    pub fn new(asset_code: impl Into<String>, date: impl Into<String>, unit: i64, amount: i64) -> Self {
        Self {
            asset_code: asset_code.into(),
            date: date.into(),
            unit,
            amount,
        }
    }
}

/// Input to a write: the caller supplies the unit count, the amount, or both
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetUnitWriteRequest {
    pub asset_code: String,
    pub date: String,
    pub unit: i64,
    pub amount: i64,
}

/// Equality filters for scanning asset unit records
///
/// `None` matches every value of that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetUnitQuery {
    /// Filter by asset code
    pub asset_code: Option<String>,
    /// Filter by date
    pub date: Option<String>,
}

impl AssetUnitQuery {
    /// Builds a query from optional raw parameters; empty strings mean "no filter"
    pub fn new(asset_code: Option<String>, date: Option<String>) -> Self {
        Self {
            asset_code: asset_code.filter(|s| !s.is_empty()),
            date: date.filter(|s| !s.is_empty()),
        }
    }

    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a query to find by asset code
    pub fn by_asset_code(asset_code: impl Into<String>) -> Self {
        Self::new(Some(asset_code.into()), None)
    }

    /// Restricts the query to a single date
    pub fn on_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into()).filter(|s| !s.is_empty());
        self
    }

    /// Returns true if the record passes every set filter
    pub fn matches(&self, record: &AssetUnit) -> bool {
        if let Some(ref asset_code) = self.asset_code {
            if &record.asset_code != asset_code {
                return false;
            }
        }
        if let Some(ref date) = self.date {
            if &record.date != date {
                return false;
            }
        }
        true
    }
}

/// Records grouped by asset code, in the order each group received them
pub type GroupedAssetUnits = BTreeMap<String, Vec<AssetUnit>>;

/// Groups records by asset code
///
/// Every record lands in exactly one group; order within a group follows
/// the input order.
pub fn group_by_asset_code(records: Vec<AssetUnit>) -> GroupedAssetUnits {
    let mut grouped = GroupedAssetUnits::new();
    for record in records {
        grouped.entry(record.asset_code.clone()).or_default().push(record);
    }
    grouped
}
