//! Cache Entry Module
//!
//! Defines the stored unit shared by both cache engines, with TTL and
//! access bookkeeping.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cached value with its freshness and access metadata.
///
/// The value type is opaque to the engines; they never inspect or mutate it.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Insertion timestamp (Unix milliseconds)
    pub cached_at: u64,
    /// Absolute expiry timestamp (Unix milliseconds); always > cached_at
    pub expires_at: u64,
    /// Number of successful reads of this entry
    pub access_count: u64,
    /// Timestamp of the most recent successful read (Unix milliseconds)
    pub last_access: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// Callers are responsible for rejecting a zero TTL; a zero value here
    /// would produce `expires_at == cached_at` and the entry would be born
    /// expired.
    pub fn new(data: T, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            data,
            cached_at: now,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
            access_count: 0,
            last_access: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`, so a read at the exact expiry
    /// instant already misses.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Touch ==
    /// Records a successful read: bumps the access count and refreshes the
    /// last-access timestamp.
    pub fn touch(&mut self) {
        self.access_count += 1;
        self.last_access = current_timestamp_ms();
    }

    // == Time To Live ==
    /// Returns the remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }

    /// Returns the remaining TTL in whole seconds, 0 once expired.
    pub fn ttl_remaining(&self) -> u64 {
        self.ttl_remaining_ms() / 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
