//! Asset unit domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the asset unit domain
#[derive(Debug, Error)]
pub enum AssetUnitError {
    #[error("Invalid reference price {0}: cannot derive units from an amount")]
    InvalidPrice(i64),

    #[error("No reference price for asset {asset_code} on {date}")]
    PriceNotFound {
        asset_code: String,
        date: String,
    },

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] PortError),
}
