pub mod categories;
pub mod error;
pub mod health;
pub mod products;
pub mod search;

pub use error::AppError;

use catalog_core::catalog::ValidationError;

/// Parses an integer path id.
fn parse_id(entity: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.parse().map_err(|_| ValidationError::InvalidId {
        entity,
        raw: raw.to_string(),
    })
}
