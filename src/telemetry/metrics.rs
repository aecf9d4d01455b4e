//! Metrics collection for NAT table activity.
//!
//! Thread-safe counters and gauges; the table records into them on every
//! operation and the surrounding system exports them however it likes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for thread-safe increment operations.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Creates a new counter initialized to zero.
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Increments the counter by 1.
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds a value to the counter.
    pub fn add(&self, val: u64) {
        self.0.fetch_add(val, Ordering::Relaxed);
    }

    /// Gets the current value of the counter.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters and gauges describing NAT table activity.
#[derive(Debug, Default)]
pub struct NatMetrics {
    /// Outbound translations served (new allocations and reuses).
    pub outbound_translations: Counter,
    /// Inbound lookups that resolved to an origin.
    pub inbound_hits: Counter,
    /// Inbound lookups for unknown or expired ports.
    pub inbound_misses: Counter,
    /// Bindings returned to the pool by reclamation sweeps.
    pub reclaimed_entries: Counter,
    /// Allocations refused because the pool stayed empty after a sweep.
    pub exhaustion_events: Counter,
    /// Address-discipline bindings recorded.
    pub address_bindings: Counter,

    // Gauges (AtomicU64, set to the current table sizes)
    /// Current number of active port bindings.
    pub active_mappings: AtomicU64,
    /// Current number of free translated ports.
    pub available_ports: AtomicU64,
}

impl NatMetrics {
    /// Creates a new metrics set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the active-bindings gauge.
    pub fn set_active_mappings(&self, n: usize) {
        self.active_mappings.store(n as u64, Ordering::Relaxed);
    }

    /// Updates the free-ports gauge.
    pub fn set_available_ports(&self, n: usize) {
        self.available_ports.store(n as u64, Ordering::Relaxed);
    }

    /// Exports all metrics as key-value pairs.
    pub fn export(&self) -> Vec<(String, u64)> {
        vec![
            (
                "outbound_translations".into(),
                self.outbound_translations.get(),
            ),
            ("inbound_hits".into(), self.inbound_hits.get()),
            ("inbound_misses".into(), self.inbound_misses.get()),
            ("reclaimed_entries".into(), self.reclaimed_entries.get()),
            ("exhaustion_events".into(), self.exhaustion_events.get()),
            ("address_bindings".into(), self.address_bindings.get()),
            (
                "active_mappings".into(),
                self.active_mappings.load(Ordering::Relaxed),
            ),
            (
                "available_ports".into(),
                self.available_ports.load(Ordering::Relaxed),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_basic() {
        let counter = Counter::new();
        assert_eq!(counter.get(), 0);

        counter.inc();
        assert_eq!(counter.get(), 1);

        counter.add(10);
        assert_eq!(counter.get(), 11);
    }

    #[test]
    fn test_metrics_export() {
        let metrics = NatMetrics::new();

        metrics.outbound_translations.inc();
        metrics.inbound_misses.add(3);
        metrics.set_active_mappings(7);

        let exported = metrics.export();
        assert!(exported.contains(&("outbound_translations".into(), 1)));
        assert!(exported.contains(&("inbound_misses".into(), 3)));
        assert!(exported.contains(&("active_mappings".into(), 7)));
        assert!(exported.contains(&("exhaustion_events".into(), 0)));
    }
}
