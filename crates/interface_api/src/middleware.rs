//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            self, HeaderValue, InvalidHeaderValue,
        },
        Request,
    },
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::info;

use crate::config::ApiConfig;
use crate::AppState;

/// Headers the browser may send cross-origin
pub const ALLOW_HEADERS: &str = "X-Requested-With, Origin, X-Csrftoken, Content-Type, Accept";

/// CORS headers attached to every response
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
}

impl CorsHeaders {
    /// Builds the headers from the configured origin
    pub fn from_config(config: &ApiConfig) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            allow_origin: config.allow_origin_header()?,
        })
    }

    /// Writes the CORS headers onto a response
    pub fn apply(&self, response: &mut Response) {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}

/// CORS middleware
///
/// Adds the configured CORS headers to every response, errors included.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    state.cors.apply(&mut response);
    response
}

/// Audit logging middleware
///
/// Logs all API requests for debugging
pub async fn audit_middleware(
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
