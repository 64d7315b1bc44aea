use async_trait::async_trait;

use crate::catalog::{Product, ProductCategory, ProductWithCategory, SearchQuery};

use super::Result;

/// Read and insert operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Gets a product by its ID.
    ///
    /// A missing row is not an error: the identity-zero sentinel
    /// (`Product::default()`) is returned instead.
    async fn find_product(&self, id: i64) -> Result<Product>;

    /// Inserts a product and returns the identity assigned by the store.
    async fn insert_product(&self, product: &Product) -> Result<i64>;

    /// Runs a filtered, sorted and paginated search.
    ///
    /// Returns the requested page and the total number of matches.
    async fn search_products(&self, query: &SearchQuery)
        -> Result<(Vec<ProductWithCategory>, u64)>;
}

/// Read and insert operations for product categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Gets a category by its ID, or the identity-zero sentinel.
    async fn find_category(&self, id: i64) -> Result<ProductCategory>;

    /// Inserts a category and returns the identity assigned by the store.
    async fn insert_category(&self, category: &ProductCategory) -> Result<i64>;
}

/// A live store transaction.
///
/// Mutations go through a transaction so that the service can pair them with
/// cache invalidation. Dropping a handle without calling [`commit`] must roll
/// the transaction back.
///
/// [`commit`]: CatalogTransaction::commit
#[async_trait]
pub trait CatalogTransaction: Send {
    /// Overwrites every field of an existing product.
    ///
    /// Fails with `NotFound` when no row has the product's ID.
    async fn update_product(&mut self, product: &Product) -> Result<Product>;

    /// Deletes a product. Deleting an absent product succeeds.
    async fn delete_product(&mut self, id: i64) -> Result<()>;

    /// Overwrites an existing category. Fails with `NotFound` when absent.
    async fn update_category(&mut self, category: &ProductCategory) -> Result<ProductCategory>;

    /// Deletes a category. Deleting an absent category succeeds.
    async fn delete_category(&mut self, id: i64) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Boxed transaction handle handed to units of work.
pub type BoxedTransaction = Box<dyn CatalogTransaction>;

/// Opens store transactions.
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn begin(&self) -> Result<BoxedTransaction>;
}

/// The full store contract used by the service.
#[async_trait]
pub trait CatalogRepository: ProductRepository + CategoryRepository + TransactionProvider {
    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> Result<()>;
}
