//! Data Transfer Objects

pub mod asset_unit;
