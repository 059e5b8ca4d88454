//! Integration tests for the converter HTTP API.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rategraph_fx::FxEngineConfig;
use rategraph_server::{create_router, AppState};

fn test_state() -> AppState {
    AppState::with_config(FxEngineConfig::default())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn configure(state: &AppState, rates: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/currency-converter/configure")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(rates.to_string()))
        .unwrap();
    send(create_router(state.clone()), request).await
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(create_router(state.clone()), request).await
}

async fn convert(state: &AppState, from: &str, to: &str, amount: &str) -> (StatusCode, Value) {
    let uri = format!(
        "/currency-converter/convert?fromCurrency={}&toCurrency={}&amount={}",
        from, to, amount
    );
    get(state, &uri).await
}

fn chain() -> Value {
    json!([
        { "fromCurrency": "usd", "toCurrency": "eur", "rate": 2.0 },
        { "fromCurrency": "EUR", "toCurrency": "gbp", "rate": 3.0 }
    ])
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&test_state(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_configure_then_convert_multi_hop() {
    let state = test_state();

    let (status, body) = configure(&state, chain()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = convert(&state, "usd", "GBP", "10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_f64(), Some(60.0));

    let (status, body) = convert(&state, "gbp", "usd", "60").await;
    assert_eq!(status, StatusCode::OK);
    assert!((body.as_f64().unwrap() - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_controller_paths() {
    let state = test_state();

    let request = Request::builder()
        .method("POST")
        .uri("/CurrencyConverter/configure")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(chain().to_string()))
        .unwrap();
    let (status, body) = send(create_router(state.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = get(
        &state,
        "/CurrencyConverter/convert?fromCurrency=USD&toCurrency=GBP&amount=10",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_f64(), Some(60.0));

    let (status, body) = convert(&state, "GBP", "USD", "60").await;
    assert_eq!(status, StatusCode::OK);
    assert!((body.as_f64().unwrap() - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_rate_with_infinite_reciprocal_is_rejected() {
    let state = test_state();
    configure(&state, chain()).await;

    let (status, body) = configure(
        &state,
        json!([{ "fromCurrency": "USD", "toCurrency": "JPY", "rate": 1e-310 }]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RATE");

    let (status, body) = convert(&state, "EUR", "USD", "1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_f64(), Some(0.5));
}

#[tokio::test]
async fn test_identity_conversion() {
    let state = test_state();
    configure(&state, chain()).await;

    let (status, body) = convert(&state, "eur", "EUR", "-12.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_f64(), Some(-12.5));
}

#[tokio::test]
async fn test_unknown_currency() {
    let state = test_state();
    configure(&state, chain()).await;

    let (status, body) = convert(&state, "XXX", "USD", "1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CURRENCY_NOT_FOUND");
    assert_eq!(body["error"], "Currency not found: XXX");
}

#[tokio::test]
async fn test_unreachable_pair() {
    let state = test_state();
    configure(
        &state,
        json!([
            { "fromCurrency": "A", "toCurrency": "B", "rate": 1.5 },
            { "fromCurrency": "C", "toCurrency": "D", "rate": 2.5 }
        ]),
    )
    .await;

    let (status, body) = convert(&state, "A", "D", "1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONVERSION_PATH_NOT_FOUND");
}

#[tokio::test]
async fn test_reconfigure_drops_cached_path() {
    let state = test_state();
    configure(&state, chain()).await;

    let (status, _) = convert(&state, "USD", "GBP", "1").await;
    assert_eq!(status, StatusCode::OK);

    configure(
        &state,
        json!([
            { "fromCurrency": "USD", "toCurrency": "EUR", "rate": 2.0 },
            { "fromCurrency": "GBP", "toCurrency": "JPY", "rate": 190.0 }
        ]),
    )
    .await;

    let (status, body) = convert(&state, "USD", "GBP", "1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONVERSION_PATH_NOT_FOUND");

    configure(&state, json!([])).await;

    let (status, body) = convert(&state, "USD", "EUR", "1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CURRENCY_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_rate_is_rejected() {
    let state = test_state();
    configure(&state, chain()).await;

    let (status, body) = configure(
        &state,
        json!([{ "fromCurrency": "USD", "toCurrency": "JPY", "rate": 0.0 }]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RATE");

    // Previous configuration still in force.
    let (status, body) = convert(&state, "USD", "GBP", "1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_f64(), Some(6.0));
}

#[tokio::test]
async fn test_malformed_requests() {
    let state = test_state();
    configure(&state, chain()).await;

    let (status, body) = configure(&state, json!({ "not": "a list" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (status, body) = configure(
        &state,
        json!([{ "fromCurrency": " ", "toCurrency": "USD", "rate": 1.0 }]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (status, body) = convert(&state, "USD", "EUR", "abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (status, body) = convert(&state, "USD", "EUR", "NaN").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (status, body) = get(&state, "/currency-converter/convert?fromCurrency=USD").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_detailed_conversion() {
    let state = test_state();
    configure(&state, chain()).await;

    let uri = "/currency-converter/convert/detailed?fromCurrency=USD&toCurrency=GBP&amount=10";

    let (status, body) = get(&state, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["converted"].as_f64(), Some(60.0));
    assert_eq!(body["rate"].as_f64(), Some(6.0));
    assert_eq!(body["source"]["kind"], "graph");
    assert_eq!(body["source"]["path"], json!(["USD", "EUR", "GBP"]));

    let (status, body) = get(&state, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"]["kind"], "cache");
    assert_eq!(body["converted"].as_f64(), Some(60.0));
}

#[tokio::test]
async fn test_rates_listing() {
    let state = test_state();
    configure(&state, chain()).await;

    let (status, body) = get(&state, "/currency-converter/rates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currencies"], json!(["EUR", "GBP", "USD"]));
    assert_eq!(body["rates"].as_array().unwrap().len(), 4);
    assert_eq!(
        body["rates"][0],
        json!({ "from": "EUR", "to": "GBP", "rate": 3.0 })
    );
}

#[tokio::test]
async fn test_stats_track_cache_and_requests() {
    let state = test_state();
    configure(&state, chain()).await;

    convert(&state, "USD", "GBP", "1").await;
    convert(&state, "USD", "GBP", "2").await;
    convert(&state, "XXX", "GBP", "2").await;

    let (status, body) = get(&state, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["engine"]["currencies"], 3);
    assert_eq!(body["engine"]["edges"], 4);
    assert_eq!(body["engine"]["resolutions"], 1);
    assert_eq!(body["engine"]["cache"]["hits"], 1);
    assert_eq!(body["requests"]["configurations_applied"], 1);
    assert_eq!(body["requests"]["conversions_success"], 2);
    assert_eq!(body["requests"]["conversions_failed"], 1);
}
