//! Expiry Sweep Task
//!
//! Background housekeeping that periodically purges expired entries from a
//! cache engine. Expiry is already advisory at read time (`get` never
//! exposes an expired entry); the sweep exists only to bound memory growth
//! between reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheBackend;

/// Spawns a background task that periodically purges expired entries.
///
/// One task per engine: the engines are independent and swept
/// independently. Each sweep takes the engine's write lock, the same
/// exclusion as every other mutator.
///
/// # Arguments
/// * `cache` - Shared handle to the engine to sweep
/// * `label` - Engine name used in log lines
/// * `interval_secs` - Seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task<C>(
    cache: Arc<RwLock<C>>,
    label: &'static str,
    interval_secs: u64,
) -> JoinHandle<()>
where
    C: CacheBackend + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            cache = label,
            interval_secs, "starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let purged = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired()
            };

            if purged > 0 {
                info!(cache = label, purged, "expiry sweep removed entries");
            } else {
                debug!(cache = label, "expiry sweep found nothing to remove");
            }
        }
    })
}
