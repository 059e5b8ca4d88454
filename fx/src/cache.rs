//! Derived rate cache.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rategraph_common::CurrencyPair;
use serde::Serialize;
use tracing::debug;

/// Thread-safe memo of resolved per-unit rates keyed by ordered pair.
///
/// Entries are never invalidated one at a time. Any change to the graph
/// clears the whole cache.
#[derive(Debug, Default)]
pub struct RateCache {
    rates: DashMap<CurrencyPair, f64>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached rate for a pair.
    pub fn get(&self, pair: &CurrencyPair) -> Option<f64> {
        match self.rates.get(pair) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(pair = %pair, rate = *entry, "Cache hit");
                Some(*entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(pair = %pair, "Cache miss");
                None
            }
        }
    }

    /// Insert a resolved rate.
    pub fn insert(&self, pair: CurrencyPair, rate: f64) {
        self.rates.insert(pair, rate);
    }

    /// Clear all cached rates. Counters are kept.
    pub fn clear(&self) {
        self.rates.clear();
    }

    /// Get the number of entries in cache.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.rates.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from cache.
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / lookups as f64
    }
}
