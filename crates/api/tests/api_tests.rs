//! End-to-end tests of the HTTP surface over an in-memory provider.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use stockq_api::{AppState, ServerConfig, create_router};
use stockq_data::ProviderError;
use stockq_data::providers::InMemoryProvider;
use tower::ServiceExt;

const KEY: &str = "test-key";

fn rising(n: usize) -> Vec<f64> {
    (1..=n).map(|i| 100.0 + i as f64).collect()
}

fn app_with(provider: InMemoryProvider, keys: &[&str]) -> (Router, Arc<InMemoryProvider>) {
    let provider = Arc::new(provider);
    let config = ServerConfig {
        api_keys: keys.iter().map(|k| k.to_string()).collect(),
        ..ServerConfig::default()
    };
    let router = create_router(AppState::new(config, provider.clone()));
    (router, provider)
}

fn app() -> (Router, Arc<InMemoryProvider>) {
    app_with(
        InMemoryProvider::new()
            .with_closes("AAPL", rising(40))
            .with_closes("MSFT", vec![410.0, 412.5]),
        &[KEY],
    )
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_key(uri: &str, key: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-API-Key", key)
        .body(Body::empty())
        .unwrap()
}

fn post_stocks(symbols: Value, key: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/stocks")
        .header("x-api-key", key)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(symbols.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let (router, _) = app();
    let (status, body) = send(router.clone(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Stock Quote & Indicator API");

    let (status, body) = send(router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_price_is_public_and_uppercases_symbol() {
    let (router, _) = app();
    let (status, body) = send(router, get("/price/msft")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"symbol": "MSFT", "price": 412.5}));
}

#[tokio::test]
async fn test_unknown_symbol_is_404() {
    let (router, _) = app();
    let (status, body) = send(router, get("/price/UNKNOWNSYM")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Invalid symbol: UNKNOWNSYM", "code": 404}));
}

#[tokio::test]
async fn test_bad_period_is_400() {
    let (router, provider) = app();
    let (status, body) = send(router, get("/price/AAPL?period=forever")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_gated_route_requires_key() {
    let (router, provider) = app();

    let (status, body) = send(router.clone(), get("/stock/AAPL")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Missing API key", "code": 401}));

    let (status, body) = send(router, get_with_key("/stock/AAPL", "wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid API key");

    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_gated_route_with_key() {
    let (router, provider) = app();
    let (status, body) = send(router, get_with_key("/stock/aapl", KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"symbol": "AAPL", "price": 140.0}));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_gate_open_without_keys() {
    let (router, _) = app_with(InMemoryProvider::new().with_closes("AAPL", vec![1.0]), &[]);
    let (status, _) = send(router, get("/stock/AAPL")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_batch_reports_errors_inline() {
    let (router, _) = app();
    let (status, body) = send(router, post_stocks(json!(["aapl", "badsym"]), KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "AAPL": {"price": 140.0},
            "BADSYM": {"error": "Invalid symbol: BADSYM"}
        })
    );
}

#[tokio::test]
async fn test_batch_rejected_without_key() {
    let (router, provider) = app();
    let (status, _) = send(router, post_stocks(json!(["aapl"]), "nope")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_batch_too_large_is_400() {
    let (router, _) = app();
    let symbols: Vec<String> = (0..30).map(|i| format!("SYM{i}")).collect();
    let (status, body) = send(router, post_stocks(json!(symbols), KEY)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_indicators_on_rising_series() {
    let (router, _) = app();
    let (status, body) = send(router, get_with_key("/stock/AAPL/indicators", KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["rsi"], 100.0);

    let macd = body["macd"]["macd"].as_f64().unwrap();
    let signal = body["macd"]["signal"].as_f64().unwrap();
    let histogram = body["macd"]["histogram"].as_f64().unwrap();
    assert!(macd > 0.0);
    assert!((histogram - (macd - signal)).abs() < 1e-9);
}

#[tokio::test]
async fn test_indicators_short_series_gives_null_rsi() {
    let (router, _) = app();
    let (status, body) = send(router, get_with_key("/stock/MSFT/indicators", KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rsi"], Value::Null);
    assert!(body["macd"].is_object());
}

#[tokio::test]
async fn test_indicators_invalid_window_is_400() {
    let (router, provider) = app();
    let (status, _) = send(
        router,
        get_with_key("/stock/AAPL/indicators?fast=30&slow=10", KEY),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_intraday_series() {
    let (router, _) = app();
    let (status, body) = send(router, get("/intraday/msft")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"times": ["14:30", "14:31"], "prices": [410.0, 412.5]})
    );
}

#[tokio::test]
async fn test_intraday_daily_labels() {
    let (router, _) = app();
    let (status, body) = send(router, get("/intraday/MSFT?period=5d&interval=1d")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["times"], json!(["2024-01-02", "2024-01-03"]));
}

#[tokio::test]
async fn test_upstream_failures_map_to_status() {
    let (router, _) = app_with(
        InMemoryProvider::new().failing(ProviderError::Http("connection refused".into())),
        &[],
    );
    let (status, body) = send(router, get("/price/AAPL")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 502);

    let (router, _) = app_with(InMemoryProvider::new().failing(ProviderError::Timeout), &[]);
    let (status, body) = send(router, get("/price/AAPL")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Upstream provider timed out");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (router, _) = app();
    let (status, body) = send(router, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/stocks"].is_object());
}

#[tokio::test]
async fn test_malformed_query_is_json_400() {
    let (router, provider) = app();
    let (status, body) = send(
        router,
        get_with_key("/stock/AAPL/indicators?rsi_period=abc", KEY),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("rsi_period"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_batch_body_of_wrong_shape_is_json_422() {
    let (router, provider) = app();
    let (status, body) = send(router, post_stocks(json!({"AAPL": 1}), KEY)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);
    assert!(body["error"].is_string());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_batch_body_not_json_is_json_400() {
    let (router, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/stocks")
        .header("x-api-key", KEY)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("[\"AAPL\""))
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_openapi_document_is_json() {
    let (router, _) = app();
    let response = router.oneshot(get("/api-docs/openapi.json")).await.unwrap();

    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
}
