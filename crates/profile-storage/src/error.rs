//! Storage layer error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in the record store
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row exists for the identifier
    #[error("Profile not found: {0}")]
    NotFound(Uuid),

    /// Guarded mutation matched zero rows: the row moved past the caller's snapshot
    #[error("Edit conflict on profile {id} at version {expected}")]
    Conflict { id: Uuid, expected: i32 },

    /// Hard delete found the row already gone
    #[error("Profile already deleted: {0}")]
    AlreadyDeleted(Uuid),

    /// Timeout, pool exhaustion or lost connection
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Query rejected by the database
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Conflict-class errors: the row changed under the caller.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. } | StoreError::AlreadyDeleted(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::nil();
        let err = StoreError::Conflict { id, expected: 4 };
        assert_eq!(
            err.to_string(),
            "Edit conflict on profile 00000000-0000-0000-0000-000000000000 at version 4"
        );

        let err = StoreError::Unavailable("pool timed out".to_string());
        assert_eq!(err.to_string(), "Store unavailable: pool timed out");
    }

    #[test]
    fn test_conflict_class() {
        let id = Uuid::nil();
        assert!(StoreError::Conflict { id, expected: 1 }.is_conflict());
        assert!(StoreError::AlreadyDeleted(id).is_conflict());
        assert!(!StoreError::NotFound(id).is_conflict());
        assert!(!StoreError::Unavailable("down".into()).is_conflict());
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Unavailable(_)));

        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
