mod error;
mod http_mapping;
mod traits;
mod transaction;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::{
    BoxedTransaction, CatalogRepository, CatalogTransaction, CategoryRepository,
    ProductRepository, TransactionProvider,
};
pub use transaction::with_transaction;
