//! Breadth-first path resolution over the rate graph.
//!
//! The search carries the converted amount itself rather than a unit rate:
//! every visited currency maps to the amount reached there starting from the
//! caller's amount at the source. The amount at the target is the answer.
//!
//! The first path to reach a currency wins, so the result follows a path with
//! the fewest hops. Among several such paths the choice depends on hash map
//! iteration order and may differ between configurations.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use rategraph_common::{Currency, CurrencyPair};
use tracing::trace;

use crate::error::{FxError, FxResult};
use crate::graph::RateGraph;

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Amount reached at the target currency.
    pub amount: f64,
    /// Currencies along the path, source and target included.
    pub path: Vec<Currency>,
}

impl Resolution {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Clone, Copy)]
struct Visit<'a> {
    amount: f64,
    parent: Option<&'a Currency>,
}

/// Find a path from `from` to `to` and convert `amount` along it.
pub fn resolve<'a>(
    graph: &'a RateGraph,
    from: &'a Currency,
    to: &Currency,
    amount: f64,
) -> FxResult<Resolution> {
    for currency in [from, to] {
        if !graph.contains(currency) {
            return Err(FxError::CurrencyNotFound(currency.clone()));
        }
    }

    let mut queue: VecDeque<&'a Currency> = VecDeque::new();
    let mut visited: HashMap<&'a Currency, Visit<'a>> = HashMap::new();

    queue.push_back(from);
    visited.insert(
        from,
        Visit {
            amount,
            parent: None,
        },
    );

    while let Some(current) = queue.pop_front() {
        let visit = visited[&current];

        if current == to {
            let path = unwind(&visited, current);
            trace!(from = %from, to = %to, hops = path.len() - 1, "Path resolved");
            return Ok(Resolution {
                amount: visit.amount,
                path,
            });
        }

        for (next, rate) in graph.neighbors(current) {
            if let Entry::Vacant(slot) = visited.entry(next) {
                slot.insert(Visit {
                    amount: visit.amount * rate,
                    parent: Some(current),
                });
                queue.push_back(next);
            }
        }
    }

    Err(FxError::ConversionPathNotFound(CurrencyPair::new(
        from.clone(),
        to.clone(),
    )))
}

fn unwind<'a>(visited: &HashMap<&'a Currency, Visit<'a>>, end: &'a Currency) -> Vec<Currency> {
    let mut path = vec![end.clone()];
    let mut cursor = visited.get(end).and_then(|visit| visit.parent);

    while let Some(currency) = cursor {
        path.push(currency.clone());
        cursor = visited.get(currency).and_then(|visit| visit.parent);
    }

    path.reverse();
    path
}
