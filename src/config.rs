//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. The two engines are configured independently; they share
/// nothing but the default TTL.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the TTL engine can hold
    pub ttl_capacity: usize,
    /// Maximum number of entries the LRU engine can hold
    pub lru_capacity: usize,
    /// Default TTL in seconds for entries cached without an explicit TTL
    pub default_ttl: u64,
    /// Expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Simulated source-of-truth query latency in milliseconds
    pub source_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `TTL_CACHE_CAPACITY` - TTL engine capacity (default: 500)
    /// - `LRU_CACHE_CAPACITY` - LRU engine capacity (default: 500)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 10)
    /// - `SOURCE_LATENCY_MS` - Simulated source latency (default: 120)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            ttl_capacity: env::var("TTL_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            lru_capacity: env::var("LRU_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            source_latency_ms: env::var("SOURCE_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            ttl_capacity: 500,
            lru_capacity: 500,
            default_ttl: 300,
            cleanup_interval: 10,
            source_latency_ms: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.ttl_capacity, 500);
        assert_eq!(config.lru_capacity, 500);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.cleanup_interval, 10);
        assert_eq!(config.source_latency_ms, 120);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("TTL_CACHE_CAPACITY");
        env::remove_var("LRU_CACHE_CAPACITY");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("SOURCE_LATENCY_MS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.ttl_capacity, 500);
        assert_eq!(config.lru_capacity, 500);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.cleanup_interval, 10);
        assert_eq!(config.source_latency_ms, 120);
    }
}
