use thiserror::Error;

/// Failures reported by a cache backend.
///
/// The read path treats all of these as a miss. The write path surfaces them
/// so that a failed invalidation aborts the surrounding transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend could not be reached.
    #[error("cache unavailable: {0}")]
    ConnectionFailed(String),
    /// The backend rejected or failed a command.
    #[error("cache command failed: {0}")]
    OperationFailed(String),
    /// A cached entry could not be encoded or decoded.
    #[error("cache entry is not valid JSON: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_cache() {
        let cases = [
            (
                CacheError::ConnectionFailed("connection refused".to_string()),
                "cache unavailable: connection refused",
            ),
            (
                CacheError::OperationFailed("READONLY replica".to_string()),
                "cache command failed: READONLY replica",
            ),
            (
                CacheError::Serialization("missing field `price`".to_string()),
                "cache entry is not valid JSON: missing field `price`",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }
}
