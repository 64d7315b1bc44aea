//! SQLite row conversion functions.
//!
//! Columns are read by name so that the same functions serve both the plain
//! product queries and the joined search query.

use catalog_core::catalog::{Product, ProductCategory, ProductWithCategory};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Convert a SQLite row to a Product.
///
/// Expected columns: id, name, description, stock, category_id, price
pub fn row_to_product(row: &SqliteRow) -> sqlx::Result<Product> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        stock: row.try_get("stock")?,
        category_id: row.try_get("category_id")?,
        price: row.try_get("price")?,
    })
}

/// Convert a SQLite row to a ProductCategory.
///
/// Expected columns: id, name
pub fn row_to_category(row: &SqliteRow) -> sqlx::Result<ProductCategory> {
    Ok(ProductCategory {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

/// Convert a search row (product columns plus `category`).
pub fn row_to_product_with_category(row: &SqliteRow) -> sqlx::Result<ProductWithCategory> {
    Ok(ProductWithCategory {
        product: row_to_product(row)?,
        category: row.try_get("category")?,
    })
}
