//! Store metrics and observability.
//!
//! Counts lookups that fell back to the raw key and how language loads went,
//! so a host can spot missing translations or a broken locale source.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters owned by one `TranslationStore`.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    /// Number of `translate` calls
    lookups: AtomicUsize,

    /// Number of `translate` calls that returned the key unchanged
    fallbacks: AtomicUsize,

    /// Number of `load` calls
    loads: AtomicUsize,

    /// Number of `load` calls that failed
    load_failures: AtomicUsize,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup; `hit` is false when the key fell back to itself.
    pub fn record_lookup(&self, hit: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let fallbacks = self.fallbacks();
        let fallback_rate = if lookups > 0 {
            (fallbacks as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        let loads = self.loads();
        let load_failures = self.load_failures();
        let load_success_rate = if loads > 0 {
            // Counters are read separately, so failures may briefly run ahead of loads
            (loads.saturating_sub(load_failures) as f64 / loads as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            fallbacks,
            fallback_rate,
            loads,
            load_failures,
            load_success_rate,
        }
    }
}

/// Snapshot of a store's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub fallbacks: usize,

    /// Share of lookups that returned the key, as a percentage (0-100)
    pub fallback_rate: f64,

    pub loads: usize,
    pub load_failures: usize,

    /// Share of loads that succeeded, as a percentage (0-100)
    pub load_success_rate: f64,
}
