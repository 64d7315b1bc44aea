mod error;
mod http_mapping;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use http_mapping::cache_error_to_status_code;
pub use keys::{category_key, product_key};
pub use serialization::{
    deserialize_category, deserialize_product, serialize_category, serialize_product,
    SerializationError,
};
pub use traits::Cache;
