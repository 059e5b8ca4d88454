//! Rate graph store.

use std::collections::HashMap;

use rategraph_common::{Currency, DirectRate};

use crate::error::{FxError, FxResult};

/// Adjacency map of known rates.
///
/// Every configured edge `A -> B` at `r` is stored together with its
/// reciprocal `B -> A` at `1 / r`. The two directions are separate entries,
/// so a later rate for either direction overwrites only what it names plus
/// its own reciprocal.
#[derive(Debug, Clone, Default)]
pub struct RateGraph {
    edges: HashMap<Currency, HashMap<Currency, f64>>,
}

impl RateGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every edge.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Apply a batch of direct rates in order.
    ///
    /// The whole batch is validated first. On error nothing is written.
    pub fn apply(&mut self, rates: &[DirectRate]) -> FxResult<()> {
        validate_rates(rates)?;
        self.apply_unchecked(rates);
        Ok(())
    }

    /// Apply a batch already accepted by [`validate_rates`].
    pub(crate) fn apply_unchecked(&mut self, rates: &[DirectRate]) {
        for rate in rates {
            self.insert_edge(rate);
            self.insert_edge(&rate.reciprocal());
        }
    }

    fn insert_edge(&mut self, rate: &DirectRate) {
        self.edges
            .entry(rate.from.clone())
            .or_default()
            .insert(rate.to.clone(), rate.rate);
    }

    /// Whether the currency has at least one outgoing edge.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.edges
            .get(currency)
            .map(|neighbors| !neighbors.is_empty())
            .unwrap_or(false)
    }

    /// Outgoing edges of a currency. Iteration order is unspecified.
    pub fn neighbors(&self, currency: &Currency) -> impl Iterator<Item = (&Currency, f64)> {
        self.edges
            .get(currency)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(to, rate)| (to, *rate)))
    }

    /// The stored rate for a single directed edge.
    pub fn rate(&self, from: &Currency, to: &Currency) -> Option<f64> {
        self.edges.get(from).and_then(|neighbors| neighbors.get(to)).copied()
    }

    /// All known currencies, sorted by code.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.edges.keys().cloned().collect();
        currencies.sort();
        currencies
    }

    /// Every directed edge as a rate, sorted by pair.
    pub fn direct_rates(&self) -> Vec<DirectRate> {
        let mut rates: Vec<DirectRate> = self
            .edges
            .iter()
            .flat_map(|(from, neighbors)| {
                neighbors.iter().map(move |(to, rate)| DirectRate {
                    from: from.clone(),
                    to: to.clone(),
                    rate: *rate,
                })
            })
            .collect();
        rates.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        rates
    }

    /// Number of currencies with outgoing edges.
    pub fn currency_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    /// Check if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Reject any rate that is not positive and finite, or whose reciprocal
/// is not.
pub fn validate_rates(rates: &[DirectRate]) -> FxResult<()> {
    match rates.iter().find(|rate| !rate.is_valid()) {
        Some(invalid) => Err(FxError::InvalidRate {
            pair: invalid.pair(),
            rate: invalid.rate,
        }),
        None => Ok(()),
    }
}
