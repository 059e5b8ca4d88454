//! Main FX engine implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rategraph_common::{Currency, CurrencyPair, DirectRate};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::cache::{CacheStats, RateCache};
use crate::conversion::{unit_rate, Conversion, ConversionRequest, RateSource};
use crate::error::FxResult;
use crate::graph::{validate_rates, RateGraph};
use crate::resolver::{self, Resolution};

/// Configuration for the FX engine.
#[derive(Debug, Clone)]
pub struct FxEngineConfig {
    /// Whether to use cached rates.
    pub use_cache: bool,
    /// Take the graph read lock on cache hits as well. Without it a hit
    /// racing a reconfiguration may still see the previous rate once.
    pub consistent_reads: bool,
}

impl Default for FxEngineConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            consistent_reads: false,
        }
    }
}

/// The conversion engine: rate graph, path resolver and derived rate cache.
///
/// Configuration changes hold the graph write lock until the cache has been
/// cleared. Cache misses hold the read lock from the search through the
/// cache write-back, so a clear can never land in between and leave a rate
/// from the old graph behind.
#[derive(Debug, Default)]
pub struct FxEngine {
    graph: RwLock<RateGraph>,
    cache: RateCache,
    config: FxEngineConfig,
    resolutions: AtomicU64,
    generation: AtomicU64,
}

impl FxEngine {
    /// Create an empty engine.
    pub fn new(config: FxEngineConfig) -> Self {
        Self {
            graph: RwLock::new(RateGraph::new()),
            cache: RateCache::new(),
            config,
            resolutions: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    /// Remove every rate and every cached result.
    #[instrument(skip(self))]
    pub fn clear_configuration(&self) {
        let mut graph = self.graph.write();
        graph.clear();
        self.cache.clear();
        self.generation.fetch_add(1, Ordering::Relaxed);

        info!("Configuration cleared");
    }

    /// Add or overwrite rates, each with its reciprocal, in order.
    ///
    /// Rejects the whole batch with `InvalidRate` if any rate is not positive
    /// and finite. The cache is cleared once after the batch.
    #[instrument(skip(self, rates), fields(count = rates.len()))]
    pub fn update_configuration(&self, rates: &[DirectRate]) -> FxResult<()> {
        let mut graph = self.graph.write();
        graph.apply(rates)?;
        self.cache.clear();
        self.generation.fetch_add(1, Ordering::Relaxed);

        info!(
            currencies = graph.currency_count(),
            edges = graph.edge_count(),
            "Configuration updated"
        );
        Ok(())
    }

    /// Replace the whole configuration.
    ///
    /// Clearing and applying happen under one write lock, so no query sees
    /// the empty graph in between. An invalid batch leaves the previous
    /// configuration in force.
    #[instrument(skip(self, rates), fields(count = rates.len()))]
    pub fn configure(&self, rates: &[DirectRate]) -> FxResult<()> {
        validate_rates(rates)?;

        let mut graph = self.graph.write();
        graph.clear();
        graph.apply_unchecked(rates);
        self.cache.clear();
        self.generation.fetch_add(1, Ordering::Relaxed);

        info!(
            currencies = graph.currency_count(),
            edges = graph.edge_count(),
            "Configuration replaced"
        );
        Ok(())
    }

    /// Convert `amount` of `from` into `to`.
    #[instrument(level = "debug", skip(self))]
    pub fn convert(&self, from: &Currency, to: &Currency, amount: f64) -> FxResult<f64> {
        let pair = CurrencyPair::new(from.clone(), to.clone());

        if let Some(rate) = self.cached_rate(&pair) {
            return Ok(amount * rate);
        }

        self.resolve_and_cache(pair, amount)
            .map(|resolution| resolution.amount)
    }

    /// Convert and report how the result was obtained.
    #[instrument(level = "debug", skip(self))]
    pub fn convert_detailed(&self, request: ConversionRequest) -> FxResult<Conversion> {
        let pair = request.pair();

        if let Some(rate) = self.cached_rate(&pair) {
            let converted = request.amount * rate;
            return Ok(Conversion::new(request, converted, Some(rate), RateSource::Cache));
        }

        let resolution = self.resolve_and_cache(pair, request.amount)?;
        let rate = unit_rate(request.amount, resolution.amount);

        Ok(Conversion::new(
            request,
            resolution.amount,
            rate,
            RateSource::Graph {
                path: resolution.path,
            },
        ))
    }

    fn cached_rate(&self, pair: &CurrencyPair) -> Option<f64> {
        if !self.config.use_cache {
            return None;
        }

        if self.config.consistent_reads {
            let _graph = self.graph.read();
            return self.cache.get(pair);
        }

        self.cache.get(pair)
    }

    fn resolve_and_cache(&self, pair: CurrencyPair, amount: f64) -> FxResult<Resolution> {
        let graph = self.graph.read();
        let resolution = resolver::resolve(&graph, &pair.base, &pair.quote, amount)?;
        self.resolutions.fetch_add(1, Ordering::Relaxed);

        debug!(pair = %pair, hops = resolution.hops(), "Resolved over graph");

        if self.config.use_cache {
            if let Some(rate) = unit_rate(amount, resolution.amount) {
                self.cache.insert(pair, rate);
            }
        }

        drop(graph);
        Ok(resolution)
    }

    /// All configured currencies, sorted by code.
    pub fn currencies(&self) -> Vec<Currency> {
        self.graph.read().currencies()
    }

    /// Every stored directed rate, reciprocals included.
    pub fn direct_rates(&self) -> Vec<DirectRate> {
        self.graph.read().direct_rates()
    }

    /// Get engine statistics.
    pub fn stats(&self) -> FxEngineStats {
        let graph = self.graph.read();

        FxEngineStats {
            currencies: graph.currency_count(),
            edges: graph.edge_count(),
            generation: self.generation.load(Ordering::Relaxed),
            resolutions: self.resolutions.load(Ordering::Relaxed),
            cache: self.cache.stats(),
        }
    }
}

/// Engine statistics.
#[derive(Debug, Clone, Serialize)]
pub struct FxEngineStats {
    /// Currencies with at least one rate.
    pub currencies: usize,
    /// Directed edges, reciprocals included.
    pub edges: usize,
    /// Number of configuration changes applied.
    pub generation: u64,
    /// Searches run over the graph.
    pub resolutions: u64,
    pub cache: CacheStats,
}
