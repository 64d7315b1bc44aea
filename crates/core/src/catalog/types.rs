use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// An `id` of `0` means the product has not been stored yet, or that a lookup
/// found nothing. See [`Product::exists`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub stock: i64,
    pub category_id: i64,
    pub price: f64,
}

impl Product {
    /// Creates an unsaved product.
    pub fn new(name: impl Into<String>, category_id: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            category_id,
            price,
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Returns a copy carrying the given identity.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Returns true unless this is the identity-zero sentinel.
    pub fn exists(&self) -> bool {
        self.id != 0
    }
}

/// A product category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCategory {
    pub id: i64,
    pub name: String,
}

impl ProductCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Returns true unless this is the identity-zero sentinel.
    pub fn exists(&self) -> bool {
        self.id != 0
    }
}

/// A search row: a product joined with the name of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: String,
}
