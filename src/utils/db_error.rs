//! Translation of SQLx failures into [`StoreError`].

use crate::error::StoreError;

/// Name of the primary key constraint on `urls.short`.
const URLS_PKEY: &str = "urls_pkey";

/// Returns true when `e` is a unique violation on the short code column.
pub fn is_unique_violation_on_short(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(URLS_PKEY) | None)
}

/// Wraps a SQLx error with the operation and code it failed on.
pub fn map_sqlx_error(operation: &'static str, code: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolClosed => StoreError::Closed,
        sqlx::Error::PoolTimedOut => StoreError::Timeout { operation },
        source => StoreError::Database {
            operation,
            code: code.to_string(),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation_on_short(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_short(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn test_pool_closed_maps_to_closed() {
        let err = map_sqlx_error("lookup", "abc123", sqlx::Error::PoolClosed);
        assert!(matches!(err, StoreError::Closed));
    }

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let err = map_sqlx_error("exists", "abc123", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Timeout { operation: "exists" }));
    }

    #[test]
    fn test_other_errors_keep_context() {
        let err = map_sqlx_error("save", "abc123", sqlx::Error::WorkerCrashed);
        match err {
            StoreError::Database {
                operation, code, ..
            } => {
                assert_eq!(operation, "save");
                assert_eq!(code, "abc123");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
