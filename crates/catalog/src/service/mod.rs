//! Catalog business logic.
//!
//! [`CatalogService`] owns the cache-aside read path and the transactional
//! write path. Handlers reach it through [`crate::usecase::CatalogUseCase`].

mod background;
mod catalog;
mod error;
#[cfg(test)]
mod test_support;
mod versions;

pub use background::BackgroundTasks;
pub use catalog::CatalogService;
pub use error::ServiceError;
pub use versions::CacheVersions;
