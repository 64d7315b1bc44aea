//! SQLite error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `catalog_core::storage`.
//! Constraint violations get semantic variants; everything else is a query
//! or connection failure.

use catalog_core::storage::RepositoryError;
use sqlx::error::ErrorKind;

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - UNIQUE / PRIMARY KEY violations → `RepositoryError::AlreadyExists`
/// - FOREIGN KEY / NOT NULL / CHECK violations → `RepositoryError::InvalidData`
/// - Pool and I/O errors → `RepositoryError::ConnectionFailed`
/// - `RowNotFound` → `RepositoryError::NotFound`
/// - Column decoding errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str, id: i64) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => RepositoryError::AlreadyExists {
                entity_type,
                id: id.to_string(),
            },
            ErrorKind::ForeignKeyViolation => RepositoryError::InvalidData(format!(
                "{entity_type} references a missing or still-referenced row: {db_err}"
            )),
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                RepositoryError::InvalidData(db_err.to_string())
            }
            _ => RepositoryError::QueryFailed(db_err.to_string()),
        },

        sqlx::Error::RowNotFound => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },

        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
            RepositoryError::ConnectionFailed(err.to_string())
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
            RepositoryError::ConnectionFailed(err.to_string())
        }

        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, "Product", 42);
        assert_eq!(
            err,
            RepositoryError::NotFound {
                entity_type: "Product",
                id: "42".to_string(),
            }
        );
    }

    #[test]
    fn test_pool_errors_map_to_connection_failed() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut, "Product", 1),
            RepositoryError::ConnectionFailed(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed, "ProductCategory", 1),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_io_error_maps_to_connection_failed() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "catalog.db");
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Io(io), "Product", 1),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_other_errors_map_to_query_failed() {
        let err = sqlx::Error::Protocol("unexpected reply".to_string());
        assert!(matches!(
            map_sqlx_error(err, "Product", 1),
            RepositoryError::QueryFailed(_)
        ));
    }
}
