//! Pure functions for mapping cache errors to HTTP status codes.

use super::CacheError;

/// Maps a [`CacheError`] to an HTTP status code.
///
/// Cache failures are never the client's fault:
///
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `OperationFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use catalog_core::cache::{cache_error_to_status_code, CacheError};
///
/// let error = CacheError::ConnectionFailed("connection refused".to_string());
/// assert_eq!(cache_error_to_status_code(&error), 503);
/// ```
pub fn cache_error_to_status_code(error: &CacheError) -> u16 {
    match error {
        CacheError::ConnectionFailed(_) => 503,
        CacheError::OperationFailed(_) => 500,
        CacheError::Serialization(_) => 500,
    }
}
