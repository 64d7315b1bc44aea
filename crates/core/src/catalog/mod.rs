mod error;
mod requests;
mod search;
mod types;

pub use error::ValidationError;
pub use requests::{
    validate_category, validate_product, CategoryCommand, CategoryManagementRequest,
    ManagementAction, ProductCommand, ProductManagementRequest,
};
pub use search::{
    total_pages, SearchParams, SearchQuery, SearchResult, SortBy, SortOrder, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use types::{Product, ProductCategory, ProductWithCategory};
