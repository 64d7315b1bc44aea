use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (default: "sqlite://catalog.db?mode=rwc")
    pub database_url: String,
    /// Maximum pooled store connections (default: 5)
    pub database_max_connections: u32,
    /// Cache TTL in seconds (default: 600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    /// Note: Only used when the `memory` feature is enabled.
    #[cfg_attr(not(feature = "memory"), allow(dead_code))]
    pub cache_max_entries: usize,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub redis_url: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// How long shutdown waits for background cache fills (default: 5)
    pub shutdown_grace_seconds: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - SQLite connection URL (default: "sqlite://catalog.db?mode=rwc")
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `SHUTDOWN_GRACE_SECONDS` - Background drain bound on shutdown (default: 5)
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://catalog.db?mode=rwc".to_string()),
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", 600),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", 10_000),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            request_timeout_seconds: env_or("REQUEST_TIMEOUT_SECONDS", 10),
            shutdown_grace_seconds: env_or("SHUTDOWN_GRACE_SECONDS", 5),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            cache_ttl_seconds: 600,
            cache_max_entries: 10_000,
            redis_url: "redis://localhost:6379".to_string(),
            request_timeout_seconds: 3,
            shutdown_grace_seconds: 2,
        }
    }

    #[test]
    fn test_duration_conversions() {
        let config = config();

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.shutdown_grace(), Duration::from_secs(2));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("REDIS_URL");
        env::remove_var("REQUEST_TIMEOUT_SECONDS");
        env::remove_var("SHUTDOWN_GRACE_SECONDS");

        let config = Config::from_env();

        assert_eq!(config.database_url, "sqlite://catalog.db?mode=rwc");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.request_timeout_seconds, 10);
        assert_eq!(config.shutdown_grace_seconds, 5);
    }

    #[test]
    fn test_unset_value_falls_back() {
        assert_eq!(env_or("CATALOG_TEST_UNSET_VARIABLE", 7u64), 7);
    }
}
