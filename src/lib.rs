//! cachelab - a consistency/latency trade-off demonstrator
//!
//! Routes identical read requests through three strategies: direct to the
//! source of truth, through a TTL-bounded cache, or through an
//! LRU-bounded cache, and reports how each read was served.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
