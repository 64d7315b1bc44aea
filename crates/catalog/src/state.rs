//! Application state.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The cache backend is chosen at compile time via feature
//! flags; the store is always SQLite.

use std::sync::Arc;

use catalog_core::cache::Cache;
use catalog_core::storage::CatalogRepository;

use crate::config::Config;
use crate::service::CatalogService;
use crate::storage::SqliteRepository;
use crate::usecase::CatalogUseCase;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub usecase: CatalogUseCase,
}

impl AppState {
    fn build(
        repository: Arc<dyn CatalogRepository>,
        cache: Arc<dyn Cache>,
        config: &Config,
    ) -> Self {
        let service = CatalogService::new(repository, cache, config.cache_ttl());
        Self {
            usecase: CatalogUseCase::new(service),
        }
    }

    async fn open_store(config: &Config) -> Result<Arc<SqliteRepository>, anyhow::Error> {
        let repository =
            SqliteRepository::connect(&config.database_url, config.database_max_connections)
                .await?;
        tracing::info!(url = %config.database_url, "Connected to SQLite store");
        Ok(Arc::new(repository))
    }
}

// ============================================================================
// Factory functions for each cache backend
// ============================================================================

#[cfg(feature = "memory")]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Self::open_store(config).await?;
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::build(repository, cache, config))
        }

        /// Creates AppState backed by a private in-memory database.
        #[cfg(test)]
        pub async fn in_memory() -> Self {
            let config = Config::default();
            let repository = SqliteRepository::new_in_memory()
                .await
                .expect("in-memory store should open");
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Self::build(Arc::new(repository), cache, &config)
        }
    }
}

#[cfg(feature = "redis")]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Self::open_store(config).await?;
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            tracing::info!(url = %config.redis_url, "Connected to Redis cache");

            Ok(Self::build(repository, cache, config))
        }
    }
}
