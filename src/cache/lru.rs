//! LRU Cache Engine
//!
//! Recency-bounded cache: the least-recently-accessed entry is evicted when
//! capacity would be exceeded, so hot keys stay resident. Entries still
//! carry a TTL as a secondary bound; recency never resurrects an expired
//! key.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::cache::metrics::{CacheMetrics, MetricsCollector};
use crate::cache::{key_is_valid, CacheBackend, CacheEntry};

// == Recency List ==
/// Total order over live keys by access recency.
///
/// Front = least recently used, back = most recently used. Keys that were
/// never re-touched sit in insertion order, which makes eviction of
/// untouched keys deterministic.
#[derive(Debug, Default)]
struct RecencyList {
    order: VecDeque<String>,
}

impl RecencyList {
    fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    /// Marks a key as most recently used.
    fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    /// Drops a key from the order.
    fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    /// Removes and returns the least recently used key.
    fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    fn peek_lru(&self) -> Option<&String> {
        self.order.front()
    }

    fn clear(&mut self) {
        self.order.clear();
    }
}

// == LRU Cache ==
/// Fixed-capacity store evicting by least-recent access.
#[derive(Debug)]
pub struct LruCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Access order for eviction
    recency: RecencyList,
    /// Effectiveness counters
    metrics: MetricsCollector,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in seconds applied when `set` receives no explicit TTL
    default_ttl: u64,
}

impl<T: Clone> LruCache<T> {
    // == Constructor ==
    /// Creates a new LruCache with the given capacity and default TTL.
    ///
    /// A zero default TTL is clamped to 1 second, as in the TTL engine.
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            metrics: MetricsCollector::new(),
            max_entries,
            default_ttl: default_ttl.max(1),
        }
    }

    /// Removes a key from both the map and the recency order.
    fn remove_entry(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.recency.remove(key);
            true
        } else {
            false
        }
    }

    /// Evicts least-recently-used keys until one more insert fits.
    ///
    /// Runs inside the same exclusive borrow as `set`, so two concurrent
    /// inserts can never both see capacity as unexceeded.
    fn enforce_max_size(&mut self) {
        while self.entries.len() >= self.max_entries {
            match self.recency.pop_lru() {
                Some(lru_key) => {
                    self.entries.remove(&lru_key);
                    self.metrics.record_eviction();
                    debug!(key = %lru_key, "lru cache evicted least recently used entry");
                }
                None => break,
            }
        }
    }
}

impl<T: Clone> CacheBackend for LruCache<T> {
    type Value = T;

    // == Get ==
    /// Returns the entry if present and unexpired, making the key most
    /// recently used. Expired entries miss regardless of recency and are
    /// removed on the spot.
    fn get(&mut self, key: &str) -> Option<CacheEntry<T>> {
        if !key_is_valid(key) {
            debug!(key, "lru cache rejected invalid key on get");
            return None;
        }
        self.metrics.record_access();

        if let Some(entry) = self.entries.get_mut(key) {
            if !entry.is_expired() {
                entry.touch();
                let snapshot = entry.clone();
                self.recency.touch(key);
                self.metrics.record_hit();
                return Some(snapshot);
            }
        }

        // Absent, or found expired: recency never resurrects an expired key
        if self.remove_entry(key) {
            self.metrics.record_expirations(1);
            debug!(key, "lru cache entry expired on read");
        }
        self.metrics.record_miss();
        None
    }

    // == Set ==
    /// Inserts or replaces the entry and makes the key most recently used.
    /// Eviction happens before the insert completes, so the capacity bound
    /// holds at every return.
    fn set(&mut self, key: &str, value: T, ttl_seconds: Option<u64>) -> bool {
        if !key_is_valid(key) {
            debug!(key, "lru cache rejected invalid key on set");
            return false;
        }
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);
        if ttl == 0 {
            debug!(key, "lru cache rejected zero ttl");
            return false;
        }
        if self.max_entries == 0 {
            debug!(key, "lru cache has zero capacity, set rejected");
            return false;
        }
        self.metrics.record_access();

        if !self.entries.contains_key(key) {
            self.enforce_max_size();
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        self.recency.touch(key);
        true
    }

    // == Invalidate ==
    /// Removes a key immediately, independent of its expiry.
    fn invalidate(&mut self, key: &str) -> bool {
        if !key_is_valid(key) {
            return false;
        }
        self.remove_entry(key)
    }

    // == Clear ==
    fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    // == Metrics ==
    fn metrics(&self) -> CacheMetrics {
        self.metrics.snapshot(self.entries.len())
    }

    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    // == Purge Expired ==
    /// Physically removes expired entries. Expiry removal and LRU eviction
    /// are independent paths; either alone makes a key miss.
    fn purge_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.recency.remove(key);
        }

        self.metrics.record_expirations(expired_keys.len() as u64);
        expired_keys.len()
    }

    // == Length ==
    fn len(&self) -> usize {
        self.entries.len()
    }
}
