//! Source-of-Truth Store
//!
//! Boundary collaborator consulted on every cache miss. In-memory with a
//! configurable simulated query latency, so the latency gap between the
//! three read strategies is visible in responses and logs.
//!
//! The store keeps only a fetch counter for observability; cache-style
//! metrics belong to the engines.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;

// == Source Store ==
/// Authoritative backing store for read strategies.
#[derive(Debug, Default)]
pub struct SourceStore {
    /// Authoritative records
    records: HashMap<String, String>,
    /// Simulated per-query latency
    query_latency: Duration,
    /// Total queries answered; atomic so `fetch` works under a read lock
    fetches: AtomicU64,
}

impl SourceStore {
    // == Constructor ==
    /// Creates an empty store with the given simulated query latency.
    pub fn new(query_latency_ms: u64) -> Self {
        Self {
            records: HashMap::new(),
            query_latency: Duration::from_millis(query_latency_ms),
            fetches: AtomicU64::new(0),
        }
    }

    /// Creates a store pre-seeded with demo records, so the service answers
    /// reads immediately after startup.
    pub fn with_fixtures(query_latency_ms: u64) -> Self {
        let mut store = Self::new(query_latency_ms);
        for (key, value) in [
            ("report:daily", "All systems nominal"),
            ("report:weekly", "Latency trending down"),
            ("profile:alice", "Alice, reliability team"),
            ("profile:bob", "Bob, data platform"),
        ] {
            store.put(key, value);
        }
        store
    }

    // == Latency ==
    /// The simulated query latency. Callers sleep for this duration
    /// *before* taking the store lock, so the wait never serializes other
    /// queries.
    pub fn latency(&self) -> Duration {
        self.query_latency
    }

    // == Fetch ==
    /// Answers a query, counting it. Returns None for unknown keys.
    pub fn fetch(&self, key: &str) -> Option<String> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let result = self.records.get(key).cloned();
        debug!(key, found = result.is_some(), "source store queried");
        result
    }

    // == Put ==
    /// Writes or overwrites a record.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.records.insert(key.into(), value.into());
    }

    // == Fetch Count ==
    /// Total queries answered since construction.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    // == Length ==
    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_fetch() {
        let mut store = SourceStore::new(0);
        store.put("key1", "value1");

        assert_eq!(store.fetch("key1"), Some("value1".to_string()));
        assert_eq!(store.fetch("missing"), None);
        assert_eq!(store.fetch_count(), 2);
    }

    #[test]
    fn test_overwrite() {
        let mut store = SourceStore::new(0);
        store.put("key1", "value1");
        store.put("key1", "value2");

        assert_eq!(store.fetch("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fixtures_seeded() {
        let store = SourceStore::with_fixtures(0);
        assert!(!store.is_empty());
        assert!(store.fetch("report:daily").is_some());
    }

    #[test]
    fn test_latency_configured() {
        let store = SourceStore::new(120);
        assert_eq!(store.latency(), Duration::from_millis(120));
    }
}
