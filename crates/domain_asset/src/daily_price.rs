//! Daily reference prices
//!
//! Prices are written by a companion system; the ledger only reads them.

use serde::{Deserialize, Serialize};

/// The reference price of an asset on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetDailyPrice {
    /// Asset identifier
    pub asset_code: String,
    /// Price date
    pub date: String,
    /// Price per whole unit, in whole currency units
    pub price: i64,
}

impl AssetDailyPrice {
    /// Creates a new daily price
    pub fn new(asset_code: impl Into<String>, date: impl Into<String>, price: i64) -> Self {
        Self {
            asset_code: asset_code.into(),
            date: date.into(),
            price,
        }
    }
}
