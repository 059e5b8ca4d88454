//! Request handlers.
//!
//! Currency codes are uppercased here, before they reach the engine.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use rategraph_common::{Currency, DirectRate};
use rategraph_fx::{Conversion, ConversionRequest, FxEngineStats};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ServerError};
use crate::metrics::MetricsSnapshot;
use crate::state::AppState;

/// One configured rate as received on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRateRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
}

impl ConversionRateRequest {
    fn into_direct_rate(self) -> Result<DirectRate> {
        let rate = DirectRate::new(self.from_currency, self.to_currency, self.rate);
        if rate.from.is_empty() || rate.to.is_empty() {
            return Err(ServerError::InvalidRequest(
                "Currency codes cannot be empty".to_string(),
            ));
        }
        Ok(rate)
    }
}

/// Query parameters for a conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertQuery {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
}

impl ConvertQuery {
    fn into_request(self) -> Result<ConversionRequest> {
        let request = ConversionRequest::new(self.from_currency, self.to_currency, self.amount);
        if request.from.is_empty() || request.to.is_empty() {
            return Err(ServerError::InvalidRequest(
                "Currency codes cannot be empty".to_string(),
            ));
        }
        if !request.amount.is_finite() {
            return Err(ServerError::InvalidRequest(
                "Amount must be a finite number".to_string(),
            ));
        }
        Ok(request)
    }
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Replace the rate configuration.
pub async fn configure(
    State(state): State<AppState>,
    body: std::result::Result<Json<Vec<ConversionRateRequest>>, JsonRejection>,
) -> Result<StatusCode> {
    let result = body
        .map_err(|e| ServerError::InvalidRequest(e.body_text()))
        .and_then(|Json(rates)| {
            rates
                .into_iter()
                .map(ConversionRateRequest::into_direct_rate)
                .collect::<Result<Vec<_>>>()
        })
        .and_then(|rates| {
            state.engine.configure(&rates)?;
            Ok(rates.len())
        });

    match result {
        Ok(count) => {
            state.metrics.configuration_applied();
            info!(rates = count, "Configuration applied");
            Ok(StatusCode::OK)
        }
        Err(e) => {
            state.metrics.configuration_rejected();
            warn!(error = %e, code = e.error_code(), "Configuration rejected");
            Err(e)
        }
    }
}

/// Convert an amount, answering with the bare converted number.
pub async fn convert(
    State(state): State<AppState>,
    query: std::result::Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<f64>> {
    let result = parse_query(query).and_then(|request| {
        state
            .engine
            .convert(&request.from, &request.to, request.amount)
            .map_err(ServerError::from)
    });

    record_conversion(&state, result).map(Json)
}

/// Convert an amount, answering with the full conversion record.
pub async fn convert_detailed(
    State(state): State<AppState>,
    query: std::result::Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<Conversion>> {
    let result = parse_query(query)
        .and_then(|request| state.engine.convert_detailed(request).map_err(ServerError::from));

    record_conversion(&state, result).map(Json)
}

fn parse_query(
    query: std::result::Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<ConversionRequest> {
    let Query(query) = query.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    query.into_request()
}

fn record_conversion<T>(state: &AppState, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => state.metrics.conversion_success(),
        Err(e) => {
            state.metrics.conversion_failed();
            warn!(error = %e, code = e.error_code(), "Conversion failed");
        }
    }
    result
}

/// Configured currencies and every stored directed rate.
#[derive(Serialize)]
pub struct RatesResponse {
    pub currencies: Vec<Currency>,
    pub rates: Vec<DirectRate>,
}

/// List the current configuration.
pub async fn rates(State(state): State<AppState>) -> Json<RatesResponse> {
    Json(RatesResponse {
        currencies: state.engine.currencies(),
        rates: state.engine.direct_rates(),
    })
}

/// Engine and request statistics.
#[derive(Serialize)]
pub struct StatsResponse {
    pub engine: FxEngineStats,
    pub requests: MetricsSnapshot,
}

/// Statistics handler.
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        engine: state.engine.stats(),
        requests: state.metrics.snapshot(),
    })
}
