//! HTTP API Layer
//!
//! This crate provides the REST endpoint for the asset unit ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for the asset unit endpoint and health checks
//! - **Middleware**: CORS response headers and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Routes
//!
//! | Method  | Path                          | Action                                 |
//! |---------|-------------------------------|----------------------------------------|
//! | GET     | `/asset-units[/:asset_code]`  | List records, optional `?date=` filter |
//! | POST    | `/asset-units[/:asset_code]`  | Record a holding from the JSON body    |
//! | OPTIONS | `/asset-units[/:asset_code]`  | CORS preflight                         |
//! | GET     | `/health`, `/health/ready`    | Liveness and store readiness           |
//!
//! Any other method on the asset unit routes answers `405 Method Not Allowed`.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config)?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    http::header::InvalidHeaderValue,
    routing::get,
    middleware as axum_middleware,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_asset::AssetUnitService;

use crate::config::ApiConfig;
use crate::middleware::{audit_middleware, cors_middleware, CorsHeaders};
use crate::handlers::{asset_unit, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: AssetUnitService,
    pub cors: CorsHeaders,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Asset unit service wired to its store ports
/// * `config` - API configuration
///
/// # Errors
///
/// Returns an error if the configured CORS origin is not a valid header value
pub fn create_router(service: AssetUnitService, config: ApiConfig) -> Result<Router, InvalidHeaderValue> {
    let cors = CorsHeaders::from_config(&config)?;
    let state = AppState { service, cors };

    let all_asset_units = get(asset_unit::list_asset_units)
        .post(asset_unit::record_asset_unit)
        .options(asset_unit::preflight)
        .fallback(asset_unit::unsupported_method);

    let asset_units_by_code = get(asset_unit::list_asset_units_by_code)
        .post(asset_unit::record_asset_unit)
        .options(asset_unit::preflight)
        .fallback(asset_unit::unsupported_method);

    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/asset-units", all_asset_units)
        .route("/asset-units/:asset_code", asset_units_by_code)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), cors_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state);

    Ok(router)
}
