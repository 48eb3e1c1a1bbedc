//! API request handlers

pub mod asset_unit;
pub mod health;
