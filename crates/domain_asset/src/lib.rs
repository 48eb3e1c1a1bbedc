//! Asset Unit Domain
//!
//! This crate implements the asset unit ledger: per-asset, per-date holdings
//! whose unit count and monetary amount are reconciled against a daily
//! reference price.
//!
//! # Key Concepts
//!
//! - **Asset Unit**: A holding of one asset on one date (`AssetCode`, `Date`, `Unit`, `Amount`)
//! - **Daily Price**: The reference price of an asset on a date, owned by a companion system
//! - **Reconciliation**: Deriving the unit count from an amount, or the amount from a unit count
//!
//! # Unit Precision
//!
//! Units are stored as integers scaled by [`UNIT_SCALE`]; e.g. an amount of
//! 10,000 at a price of 5,000 gives a stored unit of 20,000 (2.0000 units).

pub mod asset_unit;
pub mod daily_price;
pub mod reconcile;
pub mod ports;
pub mod service;
pub mod error;

pub use asset_unit::{AssetUnit, AssetUnitWriteRequest, AssetUnitQuery, GroupedAssetUnits, group_by_asset_code};
pub use daily_price::AssetDailyPrice;
pub use reconcile::reconcile;
pub use ports::{AssetUnitPort, DailyPricePort};
pub use service::AssetUnitService;
pub use error::AssetUnitError;

/// Fixed scale between stored `Unit` values and true unit counts
pub const UNIT_SCALE: i64 = 10_000;
