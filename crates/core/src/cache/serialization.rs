//! Pure functions for serializing/deserializing catalog entities to/from cache bytes.
//!
//! Cache values are JSON so that they stay readable from `redis-cli`.

use thiserror::Error;

use crate::catalog::{Product, ProductCategory};

use super::CacheError;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a product to JSON bytes.
pub fn serialize_product(product: &Product) -> Result<Vec<u8>> {
    serde_json::to_vec(product).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a product.
pub fn deserialize_product(bytes: &[u8]) -> Result<Product> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a product category to JSON bytes.
pub fn serialize_category(category: &ProductCategory) -> Result<Vec<u8>> {
    serde_json::to_vec(category).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a product category.
pub fn deserialize_category(bytes: &[u8]) -> Result<ProductCategory> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
