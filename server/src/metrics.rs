//! Request metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for the HTTP surface.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Configuration requests applied.
    pub configurations_applied: AtomicU64,
    /// Configuration requests rejected.
    pub configurations_rejected: AtomicU64,
    /// Conversions answered.
    pub conversions_success: AtomicU64,
    /// Conversions that failed.
    pub conversions_failed: AtomicU64,
}

impl Metrics {
    /// Create new metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record configuration applied.
    pub fn configuration_applied(&self) {
        self.configurations_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record configuration rejected.
    pub fn configuration_rejected(&self) {
        self.configurations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record conversion success.
    pub fn conversion_success(&self) {
        self.conversions_success.fetch_add(1, Ordering::Relaxed);
    }

    /// Record conversion failure.
    pub fn conversion_failed(&self) {
        self.conversions_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let conversions_success = self.conversions_success.load(Ordering::Relaxed);
        let conversions_failed = self.conversions_failed.load(Ordering::Relaxed);

        MetricsSnapshot {
            configurations_applied: self.configurations_applied.load(Ordering::Relaxed),
            configurations_rejected: self.configurations_rejected.load(Ordering::Relaxed),
            conversions_total: conversions_success + conversions_failed,
            conversions_success,
            conversions_failed,
        }
    }
}

/// Point-in-time metrics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub configurations_applied: u64,
    pub configurations_rejected: u64,
    pub conversions_total: u64,
    pub conversions_success: u64,
    pub conversions_failed: u64,
}
