//! Cache Module
//!
//! Two independent in-memory cache engines behind one contract:
//! [`TtlCache`] bounds staleness with per-entry expiry, [`LruCache`] bounds
//! population by recency of access (with expiry as a secondary bound).

mod entry;
mod lru;
mod metrics;
mod ttl;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::LruCache;
pub use metrics::{CacheMetrics, MetricsCollector};
pub use ttl::TtlCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Per-entry bookkeeping estimate used for the coarse memory gauge.
/// A tunable relative signal, not a measured bound.
pub const ENTRY_OVERHEAD_BYTES: usize = 512;

// == Cache Backend Contract ==
/// The uniform contract both engines expose to request handlers and the
/// housekeeping task.
///
/// Failures inside an engine never escape as errors: `get` reports absence
/// with `None` and `set` reports rejection with `false`, so a cache problem
/// costs the caller latency, never correctness.
pub trait CacheBackend {
    /// The cached payload type, opaque to the engine.
    type Value: Clone;

    /// Returns a snapshot of the entry if present and unexpired, refreshing
    /// its access bookkeeping. Counts a hit or a miss.
    fn get(&mut self, key: &str) -> Option<CacheEntry<Self::Value>>;

    /// Inserts or replaces the entry, expiring `ttl_seconds` from now (the
    /// engine default when `None`). Returns false on rejection.
    fn set(&mut self, key: &str, value: Self::Value, ttl_seconds: Option<u64>) -> bool;

    /// Removes a key immediately, regardless of expiry. Returns whether a
    /// live entry was removed.
    fn invalidate(&mut self, key: &str) -> bool;

    /// Removes every entry. Hit/miss counters survive; they measure
    /// cumulative effectiveness, not current population.
    fn clear(&mut self);

    /// Point-in-time metrics snapshot; `size` is live at call time.
    fn metrics(&self) -> CacheMetrics;

    /// Zeroes the hit/miss counters without touching entries.
    fn reset_metrics(&mut self);

    /// Physically removes expired entries, returning how many were purged.
    /// Driven by the periodic sweep task, never by the request path.
    fn purge_expired(&mut self) -> usize;

    /// Current number of live entries.
    fn len(&self) -> usize;

    /// Returns true when no entries are live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared argument validation for both engines.
///
/// A rejected key is not a cache read: it must not touch the hit/miss
/// counters, or it would skew the hit-rate signal consumers route on.
pub(crate) fn key_is_valid(key: &str) -> bool {
    !key.is_empty() && key.len() <= MAX_KEY_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(key_is_valid("a"));
        assert!(key_is_valid(&"x".repeat(MAX_KEY_LENGTH)));
        assert!(!key_is_valid(""));
        assert!(!key_is_valid(&"x".repeat(MAX_KEY_LENGTH + 1)));
    }
}
