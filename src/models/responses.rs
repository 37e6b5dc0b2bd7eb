//! Response DTOs for the read-strategy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheEntry, CacheMetrics};

/// How a read was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from the cache engine
    Hit,
    /// Engine consulted but the value came from the source of truth
    Miss,
    /// Direct strategy, no engine consulted
    Bypass,
}

/// Cache-entry bookkeeping attached to reads served from a cache.
#[derive(Debug, Clone, Serialize)]
pub struct EntryMeta {
    /// When the value entered the cache (Unix ms)
    pub cached_at: u64,
    /// Absolute expiry (Unix ms)
    pub expires_at: u64,
    /// Remaining freshness in whole seconds
    pub ttl_remaining: u64,
    /// Successful reads of this entry so far
    pub access_count: u64,
    /// Most recent successful read (Unix ms)
    pub last_access: u64,
}

impl EntryMeta {
    /// Builds metadata from an entry snapshot; the value type is irrelevant
    /// to the bookkeeping.
    pub fn from_entry<T>(entry: &CacheEntry<T>) -> Self {
        Self {
            cached_at: entry.cached_at,
            expires_at: entry.expires_at,
            ttl_remaining: entry.ttl_remaining(),
            access_count: entry.access_count,
            last_access: entry.last_access,
        }
    }
}

/// Response body for the read endpoint (GET /read/:strategy/:key)
#[derive(Debug, Clone, Serialize)]
pub struct ReadResponse {
    /// The requested key
    pub key: String,
    /// The value served
    pub value: String,
    /// Which strategy served the read
    pub strategy: String,
    /// Whether the cache satisfied the read
    pub cache: CacheStatus,
    /// Wall-clock time spent serving the read, in microseconds
    pub elapsed_us: u64,
    /// Entry bookkeeping, present only on cache hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryMeta>,
}

impl ReadResponse {
    /// Creates a new ReadResponse
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        strategy: impl Into<String>,
        cache: CacheStatus,
        elapsed_us: u64,
        entry: Option<EntryMeta>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            strategy: strategy.into(),
            cache,
            elapsed_us,
            entry,
        }
    }
}

/// Response body for seeding the source store (PUT /source)
#[derive(Debug, Clone, Serialize)]
pub struct SeedResponse {
    /// Success message
    pub message: String,
    /// The key that was written
    pub key: String,
}

impl SeedResponse {
    /// Creates a new SeedResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Source record '{}' written", key),
            key,
        }
    }
}

/// Response body for cache invalidation (DELETE /cache/:strategy/:key)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// The strategy whose engine was targeted
    pub strategy: String,
    /// The key that was invalidated
    pub key: String,
    /// Whether a live entry was actually removed
    pub removed: bool,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(strategy: impl Into<String>, key: impl Into<String>, removed: bool) -> Self {
        Self {
            strategy: strategy.into(),
            key: key.into(),
            removed,
        }
    }
}

/// Response body for clearing an engine (POST /cache/:strategy/clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// The strategy whose engine was cleared
    pub strategy: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(strategy: impl Into<String>) -> Self {
        let strategy = strategy.into();
        Self {
            message: format!("Cache for strategy '{}' cleared", strategy),
            strategy,
        }
    }
}

/// Response body for the metrics endpoint (GET /metrics)
///
/// The two engines are independent and unaware of each other; this response
/// is where their snapshots are composed side by side.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    /// TTL engine snapshot
    pub ttl: CacheMetrics,
    /// LRU engine snapshot
    pub lru: CacheMetrics,
    /// Total queries answered by the source-of-truth store
    pub source_fetches: u64,
}

/// Response body for the metrics reset endpoint (POST /metrics/reset)
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    /// Success message
    pub message: String,
}

impl ResetResponse {
    /// Creates a new ResetResponse
    pub fn new() -> Self {
        Self {
            message: "Cache metrics reset".to_string(),
        }
    }
}

impl Default for ResetResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
