//! SQLite transaction handle.

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};

use catalog_core::catalog::{Product, ProductCategory};
use catalog_core::storage::{CatalogTransaction, RepositoryError, Result};

use super::error::map_sqlx_error;
use super::schema;

/// A live `BEGIN ... COMMIT` scope on one pooled connection.
///
/// `sqlx` rolls the transaction back when it is dropped without a commit.
pub struct SqliteTransaction {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteTransaction {
    pub(super) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl CatalogTransaction for SqliteTransaction {
    async fn update_product(&mut self, product: &Product) -> Result<Product> {
        let result = sqlx::query(schema::UPDATE_PRODUCT)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.stock)
            .bind(product.category_id)
            .bind(product.price)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Product", product.id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Product",
                id: product.id.to_string(),
            });
        }

        Ok(product.clone())
    }

    async fn delete_product(&mut self, id: i64) -> Result<()> {
        sqlx::query(schema::DELETE_PRODUCT)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Product", id))?;
        Ok(())
    }

    async fn update_category(&mut self, category: &ProductCategory) -> Result<ProductCategory> {
        let result = sqlx::query(schema::UPDATE_CATEGORY)
            .bind(category.id)
            .bind(&category.name)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error(e, "ProductCategory", category.id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "ProductCategory",
                id: category.id.to_string(),
            });
        }

        Ok(category.clone())
    }

    async fn delete_category(&mut self, id: i64) -> Result<()> {
        sqlx::query(schema::DELETE_CATEGORY)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error(e, "ProductCategory", id))?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("commit failed: {e}")))
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("rollback failed: {e}")))
    }
}
