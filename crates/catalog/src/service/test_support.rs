//! Hand-written test doubles for the service layer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::cache::{Cache, CacheError, Result as CacheResult};
use catalog_core::catalog::{Product, ProductCategory, ProductWithCategory, SearchQuery};
use catalog_core::storage::{
    BoxedTransaction, CatalogRepository, CatalogTransaction, CategoryRepository,
    ProductRepository, RepositoryError, Result, TransactionProvider,
};

type Table<T> = Arc<RwLock<HashMap<i64, T>>>;

/// Repository double with call counters and staged transactions.
///
/// Transactional writes are buffered and only reach the tables on commit.
#[derive(Default)]
pub struct MockCatalogRepository {
    products: Table<Product>,
    categories: Table<ProductCategory>,
    next_id: AtomicI64,
    pub find_product_calls: AtomicUsize,
    pub find_category_calls: AtomicUsize,
    pub commits: Arc<AtomicUsize>,
    pub rollbacks: Arc<AtomicUsize>,
}

impl MockCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stored_product(&self, id: i64) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl ProductRepository for MockCatalogRepository {
    async fn find_product(&self, id: i64) -> Result<Product> {
        self.find_product_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored_product(id).await.unwrap_or_default())
    }

    async fn insert_product(&self, product: &Product) -> Result<i64> {
        let id = self.next_id();
        self.products
            .write()
            .await
            .insert(id, product.clone().with_id(id));
        Ok(id)
    }

    async fn search_products(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<ProductWithCategory>, u64)> {
        let categories = self.categories.read().await;
        let mut items: Vec<_> = self
            .products
            .read()
            .await
            .values()
            .map(|product| ProductWithCategory {
                product: product.clone(),
                category: categories
                    .get(&product.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
            })
            .collect();
        items.sort_by_key(|item| item.product.id);

        let total = items.len() as u64;
        let page = items
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .collect();
        Ok((page, total))
    }
}

#[async_trait]
impl CategoryRepository for MockCatalogRepository {
    async fn find_category(&self, id: i64) -> Result<ProductCategory> {
        self.find_category_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .categories
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_category(&self, category: &ProductCategory) -> Result<i64> {
        let id = self.next_id();
        self.categories
            .write()
            .await
            .insert(id, category.clone().with_id(id));
        Ok(id)
    }
}

#[async_trait]
impl TransactionProvider for MockCatalogRepository {
    async fn begin(&self) -> Result<BoxedTransaction> {
        Ok(Box::new(MockTransaction {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
            staged: Vec::new(),
            commits: Arc::clone(&self.commits),
            rollbacks: Arc::clone(&self.rollbacks),
        }))
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

enum Staged {
    PutProduct(Product),
    RemoveProduct(i64),
    PutCategory(ProductCategory),
    RemoveCategory(i64),
}

struct MockTransaction {
    products: Table<Product>,
    categories: Table<ProductCategory>,
    staged: Vec<Staged>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

#[async_trait]
impl CatalogTransaction for MockTransaction {
    async fn update_product(&mut self, product: &Product) -> Result<Product> {
        if !self.products.read().await.contains_key(&product.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Product",
                id: product.id.to_string(),
            });
        }
        self.staged.push(Staged::PutProduct(product.clone()));
        Ok(product.clone())
    }

    async fn delete_product(&mut self, id: i64) -> Result<()> {
        self.staged.push(Staged::RemoveProduct(id));
        Ok(())
    }

    async fn update_category(&mut self, category: &ProductCategory) -> Result<ProductCategory> {
        if !self.categories.read().await.contains_key(&category.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "ProductCategory",
                id: category.id.to_string(),
            });
        }
        self.staged.push(Staged::PutCategory(category.clone()));
        Ok(category.clone())
    }

    async fn delete_category(&mut self, id: i64) -> Result<()> {
        self.staged.push(Staged::RemoveCategory(id));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MockTransaction {
            products,
            categories,
            staged,
            commits,
            ..
        } = *self;
        let mut products = products.write().await;
        let mut categories = categories.write().await;
        for op in staged {
            match op {
                Staged::PutProduct(p) => {
                    products.insert(p.id, p);
                }
                Staged::RemoveProduct(id) => {
                    products.remove(&id);
                }
                Staged::PutCategory(c) => {
                    categories.insert(c.id, c);
                }
                Staged::RemoveCategory(id) => {
                    categories.remove(&id);
                }
            }
        }
        commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Cache double with per-operation failure switches.
#[derive(Default)]
pub struct MockCache {
    pub store: RwLock<HashMap<String, Vec<u8>>>,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }
}

fn unavailable() -> CacheError {
    CacheError::ConnectionFailed("cache offline".to_string())
}

#[async_trait]
impl Cache for MockCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.store
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.store.write().await.remove(key);
        Ok(())
    }
}
