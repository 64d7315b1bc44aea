//! Management request payloads for products and categories.
//!
//! A single endpoint per entity accepts an `action` discriminator alongside the
//! entity fields. These types turn that loose payload into a validated command.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::types::{Product, ProductCategory};

/// The action requested on a management endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementAction {
    Add,
    Edit,
    Delete,
}

impl ManagementAction {
    /// Parse the raw `action` field.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim() {
            "" => Err(ValidationError::MissingAction),
            "add" => Ok(Self::Add),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            other => Err(ValidationError::UnknownAction(other.to_string())),
        }
    }
}

/// Request body for `POST /v1/product`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductManagementRequest {
    #[serde(default)]
    pub action: String,
    #[serde(flatten)]
    pub product: Product,
}

/// Request body for `POST /v1/product_category`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryManagementRequest {
    #[serde(default)]
    pub action: String,
    #[serde(flatten)]
    pub category: ProductCategory,
}

/// A validated product command.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCommand {
    Add(Product),
    Edit(Product),
    Delete(i64),
}

/// A validated category command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryCommand {
    Add(ProductCategory),
    Edit(ProductCategory),
    Delete(i64),
}

impl ProductManagementRequest {
    pub fn into_command(self) -> Result<ProductCommand, ValidationError> {
        let action = ManagementAction::parse(&self.action)?;
        let product = self.product;

        match action {
            ManagementAction::Add => {
                if product.id != 0 {
                    return Err(ValidationError::IdNotAllowed);
                }
                validate_product(&product)?;
                Ok(ProductCommand::Add(product))
            }
            ManagementAction::Edit => {
                require_id(product.id)?;
                validate_product(&product)?;
                Ok(ProductCommand::Edit(product))
            }
            ManagementAction::Delete => {
                require_id(product.id)?;
                Ok(ProductCommand::Delete(product.id))
            }
        }
    }
}

impl CategoryManagementRequest {
    pub fn into_command(self) -> Result<CategoryCommand, ValidationError> {
        let action = ManagementAction::parse(&self.action)?;
        let category = self.category;

        match action {
            ManagementAction::Add => {
                if category.id != 0 {
                    return Err(ValidationError::IdNotAllowed);
                }
                validate_category(&category)?;
                Ok(CategoryCommand::Add(category))
            }
            ManagementAction::Edit => {
                require_id(category.id)?;
                validate_category(&category)?;
                Ok(CategoryCommand::Edit(category))
            }
            ManagementAction::Delete => {
                require_id(category.id)?;
                Ok(CategoryCommand::Delete(category.id))
            }
        }
    }
}

fn require_id(id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::IdRequired);
    }
    Ok(())
}

/// Validates the fields of a product that is about to be written.
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    if product.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

/// Validates the fields of a category that is about to be written.
pub fn validate_category(category: &ProductCategory) -> Result<(), ValidationError> {
    if category.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}
