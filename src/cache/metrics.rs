//! Cache Metrics Module
//!
//! Per-engine hit/miss accounting and snapshot reporting.
//!
//! Counters are plain fields mutated by the owning engine inside its own
//! critical section; the snapshot derives hit rate and memory footprint on
//! demand and never mutates state.

use serde::Serialize;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::ENTRY_OVERHEAD_BYTES;

// == Metrics Collector ==
/// Live counters owned by a single cache engine.
///
/// Each engine instance owns exactly one collector; there is no
/// cross-engine aggregation here. Hits and misses are monotonically
/// non-decreasing except through an explicit [`MetricsCollector::reset`].
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    /// Number of successful cache reads
    hits: u64,
    /// Number of failed cache reads (absent or expired)
    misses: u64,
    /// Number of entries removed to satisfy the capacity bound
    evictions: u64,
    /// Number of entries removed because their TTL elapsed
    expirations: u64,
    /// Timestamp of the most recent get/set on the engine (Unix ms)
    last_access: Option<u64>,
}

impl MetricsCollector {
    // == Constructor ==
    /// Creates a collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Recorders ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the capacity-eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Adds `count` TTL removals to the expiration counter.
    pub fn record_expirations(&mut self, count: u64) {
        self.expirations += count;
    }

    /// Refreshes the engine-level last-access timestamp.
    pub fn record_access(&mut self) {
        self.last_access = Some(current_timestamp_ms());
    }

    // == Reset ==
    /// Zeroes all counters and clears the last-access timestamp.
    ///
    /// Key operations never reset counters; this exists for the explicit
    /// operator-driven reset only.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // == Snapshot ==
    /// Produces a point-in-time snapshot; `size` is supplied by the engine
    /// so it reflects the live key count at call time.
    pub fn snapshot(&self, size: usize) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits,
            misses: self.misses,
            hit_rate: hit_rate_percent(self.hits, self.misses),
            evictions: self.evictions,
            expirations: self.expirations,
            size,
            memory_usage: size * ENTRY_OVERHEAD_BYTES,
            last_access: self.last_access,
        }
    }

}

// == Cache Metrics Snapshot ==
/// Read-only view of an engine's effectiveness.
#[derive(Debug, Clone, Serialize)]
pub struct CacheMetrics {
    /// Number of successful cache reads
    pub hits: u64,
    /// Number of failed cache reads
    pub misses: u64,
    /// hits / (hits + misses) * 100, 0.0 when no reads have occurred
    pub hit_rate: f64,
    /// Entries removed for capacity
    pub evictions: u64,
    /// Entries removed by TTL expiry
    pub expirations: u64,
    /// Current count of live keys
    pub size: usize,
    /// Coarse footprint estimate in bytes (relative signal only)
    pub memory_usage: usize,
    /// Most recent get/set on the engine (Unix ms), None before any traffic
    pub last_access: Option<u64>,
}

/// Hit rate as a percentage of all reads.
fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}
