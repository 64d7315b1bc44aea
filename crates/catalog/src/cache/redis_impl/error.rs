//! Redis error mapping to CacheError.

use catalog_core::cache::CacheError;

/// Maps Redis errors to CacheError.
///
/// Transport problems become `ConnectionFailed` (503 at the edge); everything
/// else, such as a `WRONGTYPE` reply, becomes `OperationFailed`.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}
