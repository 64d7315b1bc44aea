//! Catalog service with cache-aside reads and transactional writes.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use catalog_core::cache::{
    category_key, deserialize_category, deserialize_product, product_key, serialize_category,
    serialize_product, Cache, SerializationError,
};
use catalog_core::catalog::{Product, ProductCategory, SearchQuery, SearchResult};
use catalog_core::storage::{with_transaction, CatalogRepository};

use super::{BackgroundTasks, CacheVersions, ServiceError};
use crate::context::RequestId;

type Result<T> = std::result::Result<T, ServiceError>;

/// Business logic for products and categories.
///
/// - **Reads**: check the cache, fall back to the store, then fill the cache
///   from a detached task.
/// - **Writes**: run the store mutation and the cache invalidation inside one
///   store transaction; a failed invalidation rolls the store back. The
///   entry is invalidated again after commit, and [`CacheVersions`] keeps a
///   fill started before the write from landing after it.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
    background: BackgroundTasks,
    versions: CacheVersions,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
            background: BackgroundTasks::new(),
            versions: CacheVersions::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------------

    /// Gets a product, or the identity-zero sentinel when it does not exist.
    pub async fn get_product(&self, id: i64, request_id: RequestId) -> Result<Product> {
        let key = product_key(id);

        if let Some(product) = self.read_cache(&key, deserialize_product).await {
            if product.exists() {
                tracing::trace!(product_id = id, "Cache hit for product");
                return Ok(product);
            }
        }

        tracing::trace!(product_id = id, "Cache miss for product");
        let version = self.versions.current(&key).await;
        let product = self.repository.find_product(id).await?;

        if product.exists() {
            self.fill_cache(key, serialize_product(&product), version, request_id);
        }

        Ok(product)
    }

    /// Inserts a product and returns its new identity.
    pub async fn create_product(&self, product: &Product) -> Result<i64> {
        let id = self.repository.insert_product(product).await?;
        tracing::debug!(product_id = id, name = %product.name, "Product created");
        Ok(id)
    }

    /// Overwrites a product and invalidates its cache entry.
    pub async fn update_product(&self, product: Product) -> Result<Product> {
        let cache = Arc::clone(&self.cache);
        let versions = self.versions.clone();
        let key = product_key(product.id);
        let tx_key = key.clone();

        let updated = with_transaction(self.repository.as_ref(), move |tx| {
            Box::pin(async move {
                let updated = tx.update_product(&product).await?;
                versions.invalidate(cache.as_ref(), &tx_key).await?;
                Ok::<_, ServiceError>(updated)
            })
        })
        .await?;
        self.invalidate_after_commit(&key).await;

        tracing::debug!(product_id = updated.id, "Product updated");
        Ok(updated)
    }

    /// Deletes a product and its cache entry. Deleting twice succeeds.
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        let cache = Arc::clone(&self.cache);
        let versions = self.versions.clone();
        let key = product_key(id);
        let tx_key = key.clone();

        with_transaction(self.repository.as_ref(), move |tx| {
            Box::pin(async move {
                tx.delete_product(id).await?;
                versions.invalidate(cache.as_ref(), &tx_key).await?;
                Ok::<_, ServiceError>(())
            })
        })
        .await?;
        self.invalidate_after_commit(&key).await;

        tracing::debug!(product_id = id, "Product deleted");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------------

    /// Gets a category, or the identity-zero sentinel when it does not exist.
    pub async fn get_category(&self, id: i64, request_id: RequestId) -> Result<ProductCategory> {
        let key = category_key(id);

        if let Some(category) = self.read_cache(&key, deserialize_category).await {
            if category.exists() {
                tracing::trace!(category_id = id, "Cache hit for category");
                return Ok(category);
            }
        }

        tracing::trace!(category_id = id, "Cache miss for category");
        let version = self.versions.current(&key).await;
        let category = self.repository.find_category(id).await?;

        if category.exists() {
            self.fill_cache(key, serialize_category(&category), version, request_id);
        }

        Ok(category)
    }

    pub async fn create_category(&self, category: &ProductCategory) -> Result<i64> {
        let id = self.repository.insert_category(category).await?;
        tracing::debug!(category_id = id, name = %category.name, "Category created");
        Ok(id)
    }

    pub async fn update_category(&self, category: ProductCategory) -> Result<ProductCategory> {
        let cache = Arc::clone(&self.cache);
        let versions = self.versions.clone();
        let key = category_key(category.id);
        let tx_key = key.clone();

        let updated = with_transaction(self.repository.as_ref(), move |tx| {
            Box::pin(async move {
                let updated = tx.update_category(&category).await?;
                versions.invalidate(cache.as_ref(), &tx_key).await?;
                Ok::<_, ServiceError>(updated)
            })
        })
        .await?;
        self.invalidate_after_commit(&key).await;

        tracing::debug!(category_id = updated.id, "Category updated");
        Ok(updated)
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        let cache = Arc::clone(&self.cache);
        let versions = self.versions.clone();
        let key = category_key(id);
        let tx_key = key.clone();

        with_transaction(self.repository.as_ref(), move |tx| {
            Box::pin(async move {
                tx.delete_category(id).await?;
                versions.invalidate(cache.as_ref(), &tx_key).await?;
                Ok::<_, ServiceError>(())
            })
        })
        .await?;
        self.invalidate_after_commit(&key).await;

        tracing::debug!(category_id = id, "Category deleted");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Search and health
    // ------------------------------------------------------------------------

    /// Runs a search and shapes the page. Search results are never cached.
    pub async fn search_products(&self, query: &SearchQuery) -> Result<SearchResult> {
        let (items, total) = self.repository.search_products(query).await?;
        Ok(SearchResult::new(query, items, total))
    }

    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await?;
        Ok(())
    }

    /// Resolves once every spawned cache fill has finished.
    pub async fn wait_for_background_tasks(&self) {
        self.background.wait_idle().await;
    }

    /// Number of cache fills still running.
    pub fn background_tasks_in_flight(&self) -> usize {
        self.background.in_flight()
    }

    // ------------------------------------------------------------------------
    // Cache helpers
    // ------------------------------------------------------------------------

    /// Reads and decodes a cache entry. Any failure is logged and reported as a miss.
    async fn read_cache<T>(
        &self,
        key: &str,
        decode: fn(&[u8]) -> std::result::Result<T, SerializationError>,
    ) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match decode(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(cache_key = %key, error = %err, "Cache entry could not be decoded");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(cache_key = %key, error = %err, "Cache read failed");
                None
            }
        }
    }

    /// Drops an entry a concurrent read may have filled from the pre-commit row.
    /// The write is already durable, so a failure is logged only.
    async fn invalidate_after_commit(&self, key: &str) {
        if let Err(err) = self.versions.invalidate(self.cache.as_ref(), key).await {
            tracing::warn!(cache_key = %key, error = %err, "Post-commit cache invalidation failed");
        }
    }

    /// Writes an entry from a detached task unless `key` was invalidated after
    /// `version` was read. Failures are logged only.
    fn fill_cache(
        &self,
        key: String,
        encoded: std::result::Result<Vec<u8>, SerializationError>,
        version: u64,
        request_id: RequestId,
    ) {
        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(cache_key = %key, error = %err, "Cache entry could not be encoded");
                return;
            }
        };

        let cache = Arc::clone(&self.cache);
        let versions = self.versions.clone();
        let ttl = self.ttl;
        let span = tracing::info_span!("cache_fill", %request_id, cache_key = %key);

        self.background.spawn(
            async move {
                match versions.fill(cache.as_ref(), &key, &bytes, ttl, version).await {
                    Ok(true) => tracing::trace!("Cache filled"),
                    Ok(false) => tracing::debug!("Cache fill skipped, entry was written meanwhile"),
                    Err(err) => tracing::warn!(error = %err, "Cache fill failed"),
                }
            }
            .instrument(span),
        );
    }
}
