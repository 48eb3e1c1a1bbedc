//! Repository implementations for the ledger tables
//!
//! Repositories encapsulate SQL and map between database rows and domain
//! types. Queries are bound at runtime so the crate builds without a live
//! database.

pub mod asset_unit;
pub mod daily_price;

pub use asset_unit::{AssetUnitRepository, AssetUnitRow};
pub use daily_price::{DailyPriceRepository, DailyPriceRow};
