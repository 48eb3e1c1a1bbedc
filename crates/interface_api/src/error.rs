//! API error handling

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_asset::AssetUnitError;

/// Methods the asset unit endpoint answers
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    Deserialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Store error: {0}")]
    Store(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Deserialization(_) => (StatusCode::BAD_REQUEST, "deserialization_error"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            ApiError::InvalidPrice(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_price"),
            ApiError::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}

impl From<AssetUnitError> for ApiError {
    fn from(err: AssetUnitError) -> Self {
        match err {
            AssetUnitError::InvalidPrice(_) | AssetUnitError::PriceNotFound { .. } => {
                ApiError::InvalidPrice(err.to_string())
            }
            AssetUnitError::Validation(msg) | AssetUnitError::Calculation(msg) => {
                ApiError::Validation(msg)
            }
            AssetUnitError::Store(e) => ApiError::Store(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialization(err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Deserialization(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Deserialization(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
