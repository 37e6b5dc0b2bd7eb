//! API Handlers
//!
//! HTTP request handlers for the read-strategy service. The read handler is
//! the demonstration heart: the same key can be read direct, through the
//! TTL engine, or through the LRU engine, and the response says which path
//! served it and how long it took.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;
use tracing::warn;

use crate::cache::{CacheBackend, LruCache, TtlCache};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    CacheStatus, ClearResponse, EntryMeta, HealthResponse, InvalidateResponse, MetricsResponse,
    ReadResponse, ResetResponse, SeedRequest, SeedResponse,
};
use crate::source::SourceStore;

// == Read Strategy ==
/// The three ways a read can be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Always query the source of truth
    Direct,
    /// Serve through the time-bounded cache
    Ttl,
    /// Serve through the recency-bounded cache
    Lru,
}

impl Strategy {
    /// Parses a path segment into a strategy.
    pub fn from_path(segment: &str) -> Result<Self> {
        match segment {
            "direct" => Ok(Self::Direct),
            "ttl" => Ok(Self::Ttl),
            "lru" => Ok(Self::Lru),
            other => Err(ServiceError::UnknownStrategy(other.to_string())),
        }
    }

    /// Parses a path segment into a strategy that owns a cache engine.
    /// The direct strategy has no engine to invalidate or clear.
    pub fn cache_from_path(segment: &str) -> Result<Self> {
        match Self::from_path(segment)? {
            Self::Direct => Err(ServiceError::InvalidRequest(
                "Strategy 'direct' has no cache".to_string(),
            )),
            cached => Ok(cached),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Ttl => "ttl",
            Self::Lru => "lru",
        }
    }
}

// == Application State ==
/// Application state shared across all handlers.
///
/// The engines and the source store are explicit instances injected here at
/// startup, each behind its own `Arc<RwLock<>>`; nothing in the process is
/// a hidden global.
#[derive(Clone)]
pub struct AppState {
    /// Time-bounded cache engine
    pub ttl_cache: Arc<RwLock<TtlCache<String>>>,
    /// Recency-bounded cache engine
    pub lru_cache: Arc<RwLock<LruCache<String>>>,
    /// Source-of-truth store consulted on miss
    pub source: Arc<RwLock<SourceStore>>,
}

impl AppState {
    /// Creates a new AppState from explicit collaborator instances.
    pub fn new(
        ttl_cache: TtlCache<String>,
        lru_cache: LruCache<String>,
        source: SourceStore,
    ) -> Self {
        Self {
            ttl_cache: Arc::new(RwLock::new(ttl_cache)),
            lru_cache: Arc::new(RwLock::new(lru_cache)),
            source: Arc::new(RwLock::new(source)),
        }
    }

    /// Creates a new AppState from configuration, with a seeded source
    /// store.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TtlCache::new(config.ttl_capacity, config.default_ttl),
            LruCache::new(config.lru_capacity, config.default_ttl),
            SourceStore::with_fixtures(config.source_latency_ms),
        )
    }
}

// == Read-Through Helper ==
/// Queries the source of truth, simulating its latency outside any lock.
async fn fetch_from_source(source: &Arc<RwLock<SourceStore>>, key: &str) -> Result<String> {
    let latency = source.read().await.latency();
    tokio::time::sleep(latency).await;

    source
        .read()
        .await
        .fetch(key)
        .ok_or_else(|| ServiceError::NotFound(key.to_string()))
}

/// The read-through flow shared by both cached strategies: consult the
/// engine, fall back to the source on miss, write the fresh value back with
/// the engine's default TTL.
async fn read_through<C>(
    cache: &Arc<RwLock<C>>,
    source: &Arc<RwLock<SourceStore>>,
    key: &str,
) -> Result<(String, CacheStatus, Option<EntryMeta>)>
where
    C: CacheBackend<Value = String> + Send + Sync,
{
    // Write lock even for the read: get mutates recency and hit/miss
    // bookkeeping
    {
        let mut cache_guard = cache.write().await;
        if let Some(entry) = cache_guard.get(key) {
            let meta = EntryMeta::from_entry(&entry);
            return Ok((entry.data, CacheStatus::Hit, Some(meta)));
        }
    }

    // Miss: the source query (and its simulated latency) happens with no
    // cache lock held
    let value = fetch_from_source(source, key).await?;

    {
        let mut cache_guard = cache.write().await;
        if !cache_guard.set(key, value.clone(), None) {
            // A rejected cache write is miss-equivalent; the fetched value
            // is still served
            warn!(key, "cache write rejected, serving value uncached");
        }
    }

    Ok((value, CacheStatus::Miss, None))
}

// == Handlers ==

/// Handler for GET /read/:strategy/:key
///
/// Routes the same read through the chosen strategy and reports how it was
/// served.
pub async fn read_handler(
    State(state): State<AppState>,
    Path((strategy, key)): Path<(String, String)>,
) -> Result<Json<ReadResponse>> {
    let strategy = Strategy::from_path(&strategy)?;
    let started = Instant::now();

    let (value, cache_status, entry) = match strategy {
        Strategy::Direct => {
            let value = fetch_from_source(&state.source, &key).await?;
            (value, CacheStatus::Bypass, None)
        }
        Strategy::Ttl => read_through(&state.ttl_cache, &state.source, &key).await?,
        Strategy::Lru => read_through(&state.lru_cache, &state.source, &key).await?,
    };

    let elapsed_us = started.elapsed().as_micros() as u64;
    Ok(Json(ReadResponse::new(
        key,
        value,
        strategy.as_str(),
        cache_status,
        elapsed_us,
        entry,
    )))
}

/// Handler for PUT /source
///
/// Seeds or updates a source-of-truth record. Deliberately does NOT touch
/// the caches: the staleness window that opens here is what the lab
/// demonstrates, and the invalidate endpoint closes it explicitly.
pub async fn seed_handler(
    State(state): State<AppState>,
    Json(req): Json<SeedRequest>,
) -> Result<Json<SeedResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let mut source = state.source.write().await;
    source.put(req.key.clone(), req.value);

    Ok(Json(SeedResponse::new(req.key)))
}

/// Handler for DELETE /cache/:strategy/:key
///
/// Removes one key from one engine, regardless of its expiry. Always
/// succeeds; `removed` says whether a live entry was present.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path((strategy, key)): Path<(String, String)>,
) -> Result<Json<InvalidateResponse>> {
    let strategy = Strategy::cache_from_path(&strategy)?;

    let removed = match strategy {
        Strategy::Ttl => state.ttl_cache.write().await.invalidate(&key),
        Strategy::Lru => state.lru_cache.write().await.invalidate(&key),
        Strategy::Direct => unreachable!("rejected by cache_from_path"),
    };

    Ok(Json(InvalidateResponse::new(strategy.as_str(), key, removed)))
}

/// Handler for POST /cache/:strategy/clear
///
/// Empties one engine. Hit/miss counters survive; they measure cumulative
/// effectiveness.
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(strategy): Path<String>,
) -> Result<Json<ClearResponse>> {
    let strategy = Strategy::cache_from_path(&strategy)?;

    match strategy {
        Strategy::Ttl => state.ttl_cache.write().await.clear(),
        Strategy::Lru => state.lru_cache.write().await.clear(),
        Strategy::Direct => unreachable!("rejected by cache_from_path"),
    }

    Ok(Json(ClearResponse::new(strategy.as_str())))
}

/// Handler for GET /metrics
///
/// Snapshots both engines side by side. The engines are unaware of each
/// other; this is the only place their numbers meet.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    let ttl = state.ttl_cache.read().await.metrics();
    let lru = state.lru_cache.read().await.metrics();
    let source_fetches = state.source.read().await.fetch_count();

    Json(MetricsResponse {
        ttl,
        lru,
        source_fetches,
    })
}

/// Handler for POST /metrics/reset
///
/// The explicit operator-driven counter reset; key operations never reset
/// counters.
pub async fn reset_metrics_handler(State(state): State<AppState>) -> Json<ResetResponse> {
    state.ttl_cache.write().await.reset_metrics();
    state.lru_cache.write().await.reset_metrics();

    Json(ResetResponse::new())
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
