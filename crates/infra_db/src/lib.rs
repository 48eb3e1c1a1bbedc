//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL storage for the asset unit ledger
//! using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern:
//! - **Repositories** own the SQL and map rows to domain types
//! - **Adapters** implement the `domain_asset` ports on top of the
//!   repositories, translating errors and retrying transient failures
//!
//! # Tables
//!
//! | Table         | Key                  | Columns                               |
//! |---------------|----------------------|---------------------------------------|
//! | `asset_unit`  | `(asset_code, date)` | `unit BIGINT`, `amount BIGINT`        |
//! | `asset_daily` | `(asset_code, date)` | `price BIGINT`                        |
//!
//! `asset_code` and `date` are `TEXT`. The schema is owned outside this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PostgresAssetUnitAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/asset_ledger"))?;
//! let units = PostgresAssetUnitAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresAssetUnitAdapter, PostgresDailyPriceAdapter};
