use thiserror::Error;

use catalog_core::cache::{cache_error_to_status_code, CacheError};
use catalog_core::storage::{repository_error_to_status_code, RepositoryError};

/// Errors surfaced by [`CatalogService`](super::CatalogService).
///
/// Cache errors only escape on the write path, where a failed invalidation
/// rolls the store back. On the read path they are logged and swallowed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ServiceError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Repository(err) => repository_error_to_status_code(err),
            ServiceError::Cache(err) => cache_error_to_status_code(err),
        }
    }
}
