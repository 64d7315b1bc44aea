//! SQLite repository implementation.
//!
//! Implements the repository traits from `catalog_core::storage` on top of a
//! `sqlx` connection pool.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use catalog_core::catalog::{Product, ProductCategory, ProductWithCategory, SearchQuery};
use catalog_core::storage::{
    BoxedTransaction, CatalogRepository, CategoryRepository, ProductRepository, RepositoryError,
    Result, TransactionProvider,
};

use super::conversions::{row_to_category, row_to_product, row_to_product_with_category};
use super::error::map_sqlx_error;
use super::schema;
use super::search::{count_statement, page_statement};
use super::transaction::SqliteTransaction;

const PRODUCT: &str = "Product";
const CATEGORY: &str = "ProductCategory";

/// SQLite-based repository implementation.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens (or creates) the database at `url` and ensures the schema exists.
    ///
    /// Foreign keys are enforced on every pooled connection.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::from_pool(pool).await
    }

    /// Creates a repository backed by a private in-memory database.
    ///
    /// Every connection to `sqlite::memory:` opens a fresh database, so the
    /// pool is pinned to one connection that is never recycled.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::raw_sql(schema::CREATE_TABLES)
            .execute(&pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(Self { pool })
    }
}

// ============================================================================
// ProductRepository implementation
// ============================================================================

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn find_product(&self, id: i64) -> Result<Product> {
        let row = sqlx::query(schema::SELECT_PRODUCT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, PRODUCT, id))?;

        match row {
            Some(row) => row_to_product(&row).map_err(|e| map_sqlx_error(e, PRODUCT, id)),
            None => Ok(Product::default()),
        }
    }

    async fn insert_product(&self, product: &Product) -> Result<i64> {
        let result = sqlx::query(schema::INSERT_PRODUCT)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.stock)
            .bind(product.category_id)
            .bind(product.price)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, PRODUCT, product.id))?;

        Ok(result.last_insert_rowid())
    }

    async fn search_products(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<ProductWithCategory>, u64)> {
        let total: i64 = count_statement(query)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, PRODUCT, 0))?;

        let rows = page_statement(query)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, PRODUCT, 0))?;

        let items = rows
            .iter()
            .map(row_to_product_with_category)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(|e| map_sqlx_error(e, PRODUCT, 0))?;

        Ok((items, u64::try_from(total).unwrap_or_default()))
    }
}

// ============================================================================
// CategoryRepository implementation
// ============================================================================

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn find_category(&self, id: i64) -> Result<ProductCategory> {
        let row = sqlx::query(schema::SELECT_CATEGORY_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, CATEGORY, id))?;

        match row {
            Some(row) => row_to_category(&row).map_err(|e| map_sqlx_error(e, CATEGORY, id)),
            None => Ok(ProductCategory::default()),
        }
    }

    async fn insert_category(&self, category: &ProductCategory) -> Result<i64> {
        let result = sqlx::query(schema::INSERT_CATEGORY)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, CATEGORY, category.id))?;

        Ok(result.last_insert_rowid())
    }
}

// ============================================================================
// Transactions
// ============================================================================

#[async_trait]
impl TransactionProvider for SqliteRepository {
    async fn begin(&self) -> Result<BoxedTransaction> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Ok(Box::new(SqliteTransaction::new(tx)))
    }
}

#[async_trait]
impl CatalogRepository for SqliteRepository {
    async fn ping(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use catalog_core::catalog::{total_pages, SortBy, SortOrder};

    async fn repository() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    async fn seed_category(repo: &SqliteRepository, name: &str) -> i64 {
        repo.insert_category(&ProductCategory::new(name))
            .await
            .unwrap()
    }

    async fn seed_product(repo: &SqliteRepository, name: &str, category_id: i64, price: f64) -> i64 {
        repo.insert_product(&Product::new(name, category_id, price))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_product() {
        let repo = repository().await;
        let category_id = seed_category(&repo, "Hardware").await;

        let product = Product::new("Widget", category_id, 9.99)
            .with_description("Small and shiny")
            .with_stock(12);
        let id = repo.insert_product(&product).await.unwrap();
        assert!(id > 0);

        let found = repo.find_product(id).await.unwrap();
        assert_eq!(found, product.with_id(id));
    }

    #[tokio::test]
    async fn test_find_missing_product_returns_sentinel() {
        let repo = repository().await;

        let found = repo.find_product(404).await.unwrap();
        assert_eq!(found.id, 0);

        let category = repo.find_category(404).await.unwrap();
        assert_eq!(category.id, 0);
    }

    #[tokio::test]
    async fn test_insert_product_with_missing_category_is_invalid() {
        let repo = repository().await;

        let result = repo.insert_product(&Product::new("Orphan", 99, 1.0)).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_update_commits() {
        let repo = repository().await;
        let category_id = seed_category(&repo, "Hardware").await;
        let id = seed_product(&repo, "Widget", category_id, 9.99).await;

        let mut tx = repo.begin().await.unwrap();
        let updated = tx
            .update_product(&Product::new("Widget", category_id, 12.5).with_id(id))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(updated.price, 12.5);
        assert_eq!(repo.find_product(id).await.unwrap().price, 12.5);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = repository().await;

        let mut tx = repo.begin().await.unwrap();
        let result = tx
            .update_category(&ProductCategory::new("Ghost").with_id(77))
            .await;
        tx.rollback().await.unwrap();

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "ProductCategory",
                id: "77".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_rollback_discards_changes() {
        let repo = repository().await;
        let category_id = seed_category(&repo, "Hardware").await;
        let id = seed_product(&repo, "Widget", category_id, 9.99).await;

        let mut tx = repo.begin().await.unwrap();
        tx.delete_product(id).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(repo.find_product(id).await.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let repo = repository().await;
        let category_id = seed_category(&repo, "Hardware").await;

        {
            let mut tx = repo.begin().await.unwrap();
            tx.update_category(&ProductCategory::new("Renamed").with_id(category_id))
                .await
                .unwrap();
        }

        assert_eq!(
            repo.find_category(category_id).await.unwrap().name,
            "Hardware"
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = repository().await;
        let category_id = seed_category(&repo, "Hardware").await;
        let id = seed_product(&repo, "Widget", category_id, 9.99).await;

        for _ in 0..2 {
            let mut tx = repo.begin().await.unwrap();
            tx.delete_product(id).await.unwrap();
            tx.commit().await.unwrap();
        }

        assert_eq!(repo.find_product(id).await.unwrap().id, 0);
    }

    #[tokio::test]
    async fn test_delete_referenced_category_is_rejected() {
        let repo = repository().await;
        let category_id = seed_category(&repo, "Hardware").await;
        seed_product(&repo, "Widget", category_id, 9.99).await;

        let mut tx = repo.begin().await.unwrap();
        let result = tx.delete_category(category_id).await;
        tx.rollback().await.unwrap();

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_search_filters() {
        let repo = repository().await;
        let tools = seed_category(&repo, "Tools").await;
        let toys = seed_category(&repo, "Toys").await;
        seed_product(&repo, "Claw Hammer", tools, 25.0).await;
        seed_product(&repo, "Rubber Hammer", toys, 8.0).await;
        seed_product(&repo, "Screwdriver", tools, 6.5).await;

        let query = SearchQuery {
            name: Some("Hammer".to_string()),
            ..Default::default()
        };
        let (items, total) = repo.search_products(&query).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items.len(), 2);

        let query = SearchQuery {
            category: Some("Tool".to_string()),
            min_price: 7.0,
            ..Default::default()
        };
        let (items, total) = repo.search_products(&query).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].product.name, "Claw Hammer");
        assert_eq!(items[0].category, "Tools");

        let query = SearchQuery {
            max_price: 10.0,
            ..Default::default()
        };
        let (_, total) = repo.search_products(&query).await.unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_search_sorting() {
        let repo = repository().await;
        let tools = seed_category(&repo, "Tools").await;
        seed_product(&repo, "Bolt", tools, 0.5).await;
        seed_product(&repo, "Anvil", tools, 150.0).await;
        seed_product(&repo, "Chisel", tools, 12.0).await;

        let (items, _) = repo
            .search_products(&SearchQuery::default())
            .await
            .unwrap();
        let names: Vec<_> = items.iter().map(|i| i.product.name.as_str()).collect();
        assert_eq!(names, vec!["Anvil", "Bolt", "Chisel"]);

        let query = SearchQuery {
            sort_by: SortBy::Price,
            order_by: SortOrder::Desc,
            ..Default::default()
        };
        let (items, _) = repo.search_products(&query).await.unwrap();
        let prices: Vec<_> = items.iter().map(|i| i.product.price).collect();
        assert_eq!(prices, vec![150.0, 12.0, 0.5]);
    }

    #[tokio::test]
    async fn test_search_pages_cover_every_match_once() {
        let repo = repository().await;
        let tools = seed_category(&repo, "Tools").await;
        for i in 0..23 {
            // Repeated names exercise the id tie-break.
            seed_product(&repo, &format!("Item {}", i % 4), tools, 1.0 + f64::from(i)).await;
        }

        let page_size = 5;
        let first = SearchQuery {
            page_size,
            ..Default::default()
        };
        let (_, total) = repo.search_products(&first).await.unwrap();
        assert_eq!(total, 23);

        let pages = total_pages(total, page_size);
        assert_eq!(pages, 5);

        let mut seen = HashSet::new();
        let mut count = 0;
        for page in 1..=pages {
            let query = SearchQuery {
                page: page as u32,
                page_size,
                ..Default::default()
            };
            let (items, _) = repo.search_products(&query).await.unwrap();
            for item in items {
                count += 1;
                seen.insert(item.product.id);
            }
        }

        assert_eq!(count, 23);
        assert_eq!(seen.len(), 23);
    }

    #[tokio::test]
    async fn test_ping() {
        let repo = repository().await;
        assert!(repo.ping().await.is_ok());
    }
}
