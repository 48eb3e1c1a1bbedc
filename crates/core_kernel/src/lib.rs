//! Core Kernel - Foundational abstractions for the asset unit ledger
//!
//! This crate provides the building blocks shared by the domain, storage,
//! and HTTP layers:
//! - Port infrastructure (`PortError`, `DomainPort`, health checks)
//! - Adapter retry policy for transient store failures

pub mod ports;
pub mod retry;

pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckable, HealthCheckResult,
};
pub use retry::RetryPolicy;
