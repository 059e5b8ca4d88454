//! Currency conversion types.

use chrono::{DateTime, Utc};
use rategraph_common::{ConversionId, Currency, CurrencyPair};
use serde::Serialize;

/// Request to perform a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
    /// Amount in the source currency. Any finite value, sign is preserved.
    pub amount: f64,
}

impl ConversionRequest {
    /// Create a new conversion request.
    pub fn new(from: impl Into<Currency>, to: impl Into<Currency>, amount: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Get the currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from.clone(), self.to.clone())
    }
}

/// Where the rate for a conversion came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    /// Previously resolved rate from the cache.
    Cache,
    /// Fresh search over the graph.
    Graph {
        /// Currencies along the path, source and target included.
        path: Vec<Currency>,
    },
}

/// Represents a completed currency conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Unique conversion ID.
    pub id: ConversionId,
    pub from: Currency,
    pub to: Currency,
    /// Input amount.
    pub amount: f64,
    /// Output amount in the target currency.
    pub converted: f64,
    /// Per-unit rate, if one could be derived.
    pub rate: Option<f64>,
    pub source: RateSource,
    /// When the conversion was executed.
    pub executed_at: DateTime<Utc>,
}

impl Conversion {
    pub(crate) fn new(
        request: ConversionRequest,
        converted: f64,
        rate: Option<f64>,
        source: RateSource,
    ) -> Self {
        Self {
            id: ConversionId::new(),
            from: request.from,
            to: request.to,
            amount: request.amount,
            converted,
            rate,
            source,
            executed_at: Utc::now(),
        }
    }

    /// Whether the cache answered this conversion.
    pub fn from_cache(&self) -> bool {
        matches!(self.source, RateSource::Cache)
    }

    /// Number of edges traversed, `None` when answered from cache.
    pub fn hops(&self) -> Option<usize> {
        match &self.source {
            RateSource::Cache => None,
            RateSource::Graph { path } => Some(path.len().saturating_sub(1)),
        }
    }
}

/// Per-unit rate implied by a search result, when it is usable as a cache
/// entry. A zero amount carries no rate information.
pub(crate) fn unit_rate(amount: f64, converted: f64) -> Option<f64> {
    if amount == 0.0 {
        return None;
    }
    let rate = converted / amount;
    (rate.is_finite() && rate > 0.0).then_some(rate)
}
