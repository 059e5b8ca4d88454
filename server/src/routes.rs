//! HTTP routes.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::AppState;

/// Create the converter router.
///
/// Routes:
/// - POST /currency-converter/configure         - Replace rate configuration
/// - GET  /currency-converter/convert           - Convert, bare number
/// - GET  /currency-converter/convert/detailed  - Convert, full record
/// - GET  /currency-converter/rates             - Current configuration
/// - POST /CurrencyConverter/configure          - Same as /currency-converter/configure
/// - GET  /CurrencyConverter/convert            - Same as /currency-converter/convert
/// - GET  /stats                                - Engine and request statistics
/// - GET  /health                               - Health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/currency-converter/configure", post(configure))
        .route("/currency-converter/convert", get(convert))
        .route("/currency-converter/convert/detailed", get(convert_detailed))
        .route("/currency-converter/rates", get(rates))
        .route("/CurrencyConverter/configure", post(configure))
        .route("/CurrencyConverter/convert", get(convert))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
