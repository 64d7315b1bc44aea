//! Use-case layer between the HTTP handlers and [`CatalogService`].
//!
//! Every method forwards to the service unchanged, logs failures and adds
//! context. Typed errors stay reachable through `anyhow::Error::downcast_ref`.

use anyhow::{Context, Result};

use catalog_core::catalog::{Product, ProductCategory, SearchQuery, SearchResult};

use crate::context::RequestId;
use crate::service::CatalogService;

#[derive(Clone)]
pub struct CatalogUseCase {
    service: CatalogService,
}

impl CatalogUseCase {
    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }

    pub async fn get_product(&self, id: i64, request_id: RequestId) -> Result<Product> {
        self.service
            .get_product(id, request_id)
            .await
            .inspect_err(|err| {
                tracing::error!(product_id = id, %request_id, error = %err, "Failed to get product")
            })
            .with_context(|| format!("failed to get product {id}"))
    }

    pub async fn create_product(&self, product: &Product) -> Result<i64> {
        self.service
            .create_product(product)
            .await
            .inspect_err(|err| {
                tracing::error!(name = %product.name, error = %err, "Failed to create product")
            })
            .context("failed to create product")
    }

    pub async fn update_product(&self, product: Product) -> Result<Product> {
        let id = product.id;
        self.service
            .update_product(product)
            .await
            .inspect_err(|err| {
                tracing::error!(product_id = id, error = %err, "Failed to update product")
            })
            .with_context(|| format!("failed to update product {id}"))
    }

    pub async fn delete_product(&self, id: i64) -> Result<()> {
        self.service
            .delete_product(id)
            .await
            .inspect_err(|err| {
                tracing::error!(product_id = id, error = %err, "Failed to delete product")
            })
            .with_context(|| format!("failed to delete product {id}"))
    }

    pub async fn get_category(&self, id: i64, request_id: RequestId) -> Result<ProductCategory> {
        self.service
            .get_category(id, request_id)
            .await
            .inspect_err(|err| {
                tracing::error!(category_id = id, %request_id, error = %err, "Failed to get category")
            })
            .with_context(|| format!("failed to get product category {id}"))
    }

    pub async fn create_category(&self, category: &ProductCategory) -> Result<i64> {
        self.service
            .create_category(category)
            .await
            .inspect_err(|err| {
                tracing::error!(name = %category.name, error = %err, "Failed to create category")
            })
            .context("failed to create product category")
    }

    pub async fn update_category(&self, category: ProductCategory) -> Result<ProductCategory> {
        let id = category.id;
        self.service
            .update_category(category)
            .await
            .inspect_err(|err| {
                tracing::error!(category_id = id, error = %err, "Failed to update category")
            })
            .with_context(|| format!("failed to update product category {id}"))
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.service
            .delete_category(id)
            .await
            .inspect_err(|err| {
                tracing::error!(category_id = id, error = %err, "Failed to delete category")
            })
            .with_context(|| format!("failed to delete product category {id}"))
    }

    pub async fn search_products(&self, query: &SearchQuery) -> Result<SearchResult> {
        self.service
            .search_products(query)
            .await
            .inspect_err(|err| {
                tracing::error!(
                    sort_by = query.sort_by.as_str(),
                    page = query.page,
                    error = %err,
                    "Failed to search products"
                )
            })
            .context("failed to search products")
    }

    pub async fn ping(&self) -> Result<()> {
        self.service
            .ping()
            .await
            .inspect_err(|err| tracing::error!(error = %err, "Store ping failed"))
            .context("store is not reachable")
    }

    pub async fn wait_for_background_tasks(&self) {
        self.service.wait_for_background_tasks().await;
    }

    pub fn background_tasks_in_flight(&self) -> usize {
        self.service.background_tasks_in_flight()
    }
}
