//! Router tests against in-memory ports

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use domain_asset::ports::mock::{MockAssetUnitPort, MockDailyPricePort};
use domain_asset::{AssetDailyPrice, AssetUnit, AssetUnitService};
use interface_api::{config::ApiConfig, create_router};

const ORIGIN: &str = "https://app.example.com";

struct TestApp {
    router: Router,
    units: Arc<MockAssetUnitPort>,
}

async fn test_app(records: Vec<AssetUnit>) -> TestApp {
    let units = Arc::new(MockAssetUnitPort::with_records(records).await);
    let prices = Arc::new(
        MockDailyPricePort::with_prices(vec![
            AssetDailyPrice::new("JP001", "2024-01-01", 5000),
            AssetDailyPrice::new("JP002", "2024-01-01", 20000),
            AssetDailyPrice::new("JP000", "2024-01-01", 0),
        ])
        .await,
    );
    let service = AssetUnitService::new(units.clone(), prices);
    let config = ApiConfig {
        allow_origin: ORIGIN.to_string(),
        ..Default::default()
    };

    TestApp {
        router: create_router(service, config).unwrap(),
        units,
    }
}

fn seeded_records() -> Vec<AssetUnit> {
    vec![
        AssetUnit::new("JP001", "2024-01-01", 20000, 10000),
        AssetUnit::new("JP002", "2024-01-01", 5000, 10000),
        AssetUnit::new("JP001", "2024-01-02", 10000, 5000),
        AssetUnit::new("JP002", "2024-01-02", 10000, 20000),
    ]
}

fn request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_post_derives_unit_and_stores_record() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(
            Method::POST,
            "/asset-units",
            r#"{"AssetCode":"JP001","Date":"2024-01-01","Amount":10000}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = json_body(response).await;
    assert_eq!(
        body,
        serde_json::json!({
            "JP001": [{"AssetCode": "JP001", "Date": "2024-01-01", "Unit": 20000, "Amount": 10000}]
        })
    );
    assert_eq!(
        app.units.records().await,
        vec![AssetUnit::new("JP001", "2024-01-01", 20000, 10000)]
    );
}

#[tokio::test]
async fn test_post_ignores_path_segment() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(
            Method::POST,
            "/asset-units/JP999",
            r#"{"AssetCode":"JP002","Date":"2024-01-01","Unit":20000}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["JP002"][0]["Amount"], 40000);
    assert!(body.get("JP999").is_none());
}

#[tokio::test]
async fn test_post_overwrites_existing_record() {
    let app = test_app(seeded_records()).await;

    let response = app
        .router
        .oneshot(request(
            Method::POST,
            "/asset-units",
            r#"{"AssetCode":"JP001","Date":"2024-01-01","Amount":5000}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let records = app.units.records().await;
    assert_eq!(records.len(), 4);
    assert_eq!(records[0], AssetUnit::new("JP001", "2024-01-01", 10000, 5000));
}

#[tokio::test]
async fn test_get_filters_by_date() {
    let app = test_app(seeded_records()).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units?date=2024-01-01", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let groups = body.as_object().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["JP001"].as_array().unwrap().len(), 1);
    assert_eq!(groups["JP002"].as_array().unwrap().len(), 1);
    assert_eq!(groups["JP002"][0]["Unit"], 5000);
}

#[tokio::test]
async fn test_get_filters_by_asset_code() {
    let app = test_app(seeded_records()).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units/JP001", ""))
        .await
        .unwrap();

    let body = json_body(response).await;
    let groups = body.as_object().unwrap();
    assert_eq!(groups.len(), 1);
    let dates: Vec<&str> = groups["JP001"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
}

#[tokio::test]
async fn test_undecodable_asset_code_is_rejected() {
    let app = test_app(seeded_records()).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units/%FF", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "deserialization_error");
    assert!(body.get("JP001").is_none());
}

#[tokio::test]
async fn test_malformed_query_string_is_bad_request() {
    let app = test_app(seeded_records()).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units?date=a&date=b", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = json_body(response).await;
    assert_eq!(body["error"], "deserialization_error");
}

#[tokio::test]
async fn test_get_with_empty_filters_lists_everything() {
    let app = test_app(seeded_records()).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units?date=", ""))
        .await
        .unwrap();

    let body = json_body(response).await;
    let total: usize = body
        .as_object()
        .unwrap()
        .values()
        .map(|records| records.as_array().unwrap().len())
        .sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_get_on_empty_store_returns_empty_object() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({}));
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(Method::DELETE, "/asset-units/JP001", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "method_not_allowed");
}

#[tokio::test]
async fn test_preflight() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(Method::OPTIONS, "/asset-units", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, OPTIONS"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
}

#[tokio::test]
async fn test_cors_headers_on_success() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units", ""))
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "X-Requested-With, Origin, X-Csrftoken, Content-Type, Accept"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(Method::POST, "/asset-units", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "deserialization_error");
}

#[tokio::test]
async fn test_empty_keys_fail_validation() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(Method::POST, "/asset-units", r#"{"Amount":10000}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.units.records().await.is_empty());
}

#[tokio::test]
async fn test_missing_price_is_unprocessable() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(
            Method::POST,
            "/asset-units",
            r#"{"AssetCode":"JP009","Date":"2024-01-01","Amount":10000}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_price");
    assert!(app.units.records().await.is_empty());
}

#[tokio::test]
async fn test_zero_price_with_amount_is_unprocessable() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(
            Method::POST,
            "/asset-units",
            r#"{"AssetCode":"JP000","Date":"2024-01-01","Amount":10000}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.units.records().await.is_empty());
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let app = test_app(seeded_records()).await;
    app.units.set_unavailable(true);

    let response = app
        .router
        .oneshot(request(Method::GET, "/asset-units", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "store_error");
}

#[tokio::test]
async fn test_readiness_reflects_store_health() {
    let app = test_app(vec![]).await;

    let ready = app
        .router
        .clone()
        .oneshot(request(Method::GET, "/health/ready", ""))
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);

    app.units.set_unavailable(true);
    let not_ready = app
        .router
        .oneshot(request(Method::GET, "/health/ready", ""))
        .await
        .unwrap();
    assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let app = test_app(vec![]).await;

    let response = app
        .router
        .oneshot(request(Method::GET, "/health", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
