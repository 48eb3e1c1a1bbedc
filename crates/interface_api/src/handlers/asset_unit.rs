//! Asset unit handlers

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, instrument};
use validator::Validate;

use domain_asset::{group_by_asset_code, AssetUnitQuery, GroupedAssetUnits};

use crate::{AppState, error::{ApiError, ALLOWED_METHODS}};
use crate::dto::asset_unit::*;

/// Lists asset units, optionally filtered by date
#[instrument(skip_all)]
pub async fn list_asset_units(
    State(state): State<AppState>,
    params: Result<Query<ListAssetUnitsParams>, QueryRejection>,
) -> Result<Json<GroupedAssetUnits>, ApiError> {
    let Query(params) = params?;
    list(&state, None, params).await
}

/// Lists the asset units of one asset code, optionally filtered by date
///
/// A path segment that does not decode is rejected rather than treated as
/// an absent filter.
#[instrument(skip_all)]
pub async fn list_asset_units_by_code(
    State(state): State<AppState>,
    asset_code: Result<Path<String>, PathRejection>,
    params: Result<Query<ListAssetUnitsParams>, QueryRejection>,
) -> Result<Json<GroupedAssetUnits>, ApiError> {
    let Path(asset_code) = asset_code?;
    let Query(params) = params?;
    list(&state, Some(asset_code), params).await
}

async fn list(
    state: &AppState,
    asset_code: Option<String>,
    params: ListAssetUnitsParams,
) -> Result<Json<GroupedAssetUnits>, ApiError> {
    let query = AssetUnitQuery::new(asset_code, params.date);
    debug!(?query, "Listing asset units");
    let records = state.service.query(query).await?;
    Ok(Json(group_by_asset_code(records)))
}

/// Records an asset unit from the JSON body
///
/// The body is parsed regardless of content type; the path segment, if
/// any, is ignored.
#[instrument(skip(state, body))]
pub async fn record_asset_unit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GroupedAssetUnits>, ApiError> {
    let request: WriteAssetUnitRequest = serde_json::from_slice(&body)?;
    request.validate()?;
    debug!(asset_code = %request.asset_code, date = %request.date, "Write request parsed");

    let records = state.service.record(request.into()).await?;
    Ok(Json(group_by_asset_code(records)))
}

/// Answers a CORS preflight
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS))],
    )
}

/// Rejects any method outside GET, POST and OPTIONS
pub async fn unsupported_method(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}
