//! Reconciliation error taxonomy and its gRPC mapping.

use thiserror::Error;
use tonic::metadata::{MetadataMap, MetadataValue};
use tonic::{Code, Status};
use uuid::Uuid;

use profile_indexing::IndexError;
use profile_storage::StoreError;

/// Metadata key carrying the caller-visible result on failed calls.
pub const RESULT_METADATA_KEY: &str = "x-reconcile-result";

/// Result string for a successful reconciliation (fresh or already in sync).
pub const RESULT_INDEXED: &str = "Indexed";

/// Result string for a failed reconciliation.
pub const RESULT_FAILED: &str = "Failed";

/// Every way a reconciliation can fail. Any of these means `Failed`.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Malformed identifier; not worth retrying
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No row for the identifier at fetch time
    #[error("Profile not found: {0}")]
    NotFound(Uuid),

    /// Row moved on since it was fetched; retry from a fresh fetch
    #[error("Edit conflict on profile {id} at version {expected}")]
    Conflict { id: Uuid, expected: i32 },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Index rejected update with status {status}: {body}")]
    IndexRejected { status: u16, body: String },
}

impl ReconcileError {
    /// gRPC status code for this error class.
    pub fn code(&self) -> Code {
        match self {
            ReconcileError::InvalidArgument(_) => Code::InvalidArgument,
            ReconcileError::NotFound(_) => Code::NotFound,
            ReconcileError::Conflict { .. } => Code::Aborted,
            ReconcileError::StoreUnavailable(_) | ReconcileError::IndexUnavailable(_) => {
                Code::Unavailable
            }
            ReconcileError::IndexRejected { .. } => Code::FailedPrecondition,
        }
    }
}

impl From<StoreError> for ReconcileError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ReconcileError::NotFound(id),
            StoreError::Conflict { id, expected } => ReconcileError::Conflict { id, expected },
            StoreError::AlreadyDeleted(id) => ReconcileError::NotFound(id),
            StoreError::Unavailable(msg) | StoreError::Database(msg) => {
                ReconcileError::StoreUnavailable(msg)
            }
        }
    }
}

impl From<IndexError> for ReconcileError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::Rejected { status, body } => ReconcileError::IndexRejected { status, body },
            IndexError::Unavailable(msg)
            | IndexError::Serialization(msg)
            | IndexError::Config(msg) => ReconcileError::IndexUnavailable(msg),
        }
    }
}

impl From<ReconcileError> for Status {
    fn from(err: ReconcileError) -> Self {
        let mut metadata = MetadataMap::new();
        metadata.insert(RESULT_METADATA_KEY, MetadataValue::from_static(RESULT_FAILED));
        Status::with_metadata(err.code(), err.to_string(), metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let id = Uuid::nil();
        assert_eq!(
            ReconcileError::InvalidArgument("x".into()).code(),
            Code::InvalidArgument
        );
        assert_eq!(ReconcileError::NotFound(id).code(), Code::NotFound);
        assert_eq!(
            ReconcileError::Conflict { id, expected: 1 }.code(),
            Code::Aborted
        );
        assert_eq!(
            ReconcileError::StoreUnavailable("down".into()).code(),
            Code::Unavailable
        );
        assert_eq!(
            ReconcileError::IndexUnavailable("down".into()).code(),
            Code::Unavailable
        );
        assert_eq!(
            ReconcileError::IndexRejected {
                status: 500,
                body: String::new()
            }
            .code(),
            Code::FailedPrecondition
        );
    }

    #[test]
    fn test_status_carries_failed_result() {
        let status: Status = ReconcileError::NotFound(Uuid::nil()).into();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(
            status
                .metadata()
                .get(RESULT_METADATA_KEY)
                .and_then(|v| v.to_str().ok()),
            Some(RESULT_FAILED)
        );
        assert!(status.message().contains("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_from_store_error() {
        let id = Uuid::nil();
        assert!(matches!(
            ReconcileError::from(StoreError::Conflict { id, expected: 3 }),
            ReconcileError::Conflict { expected: 3, .. }
        ));
        assert!(matches!(
            ReconcileError::from(StoreError::Database("syntax".into())),
            ReconcileError::StoreUnavailable(_)
        ));
    }

    #[test]
    fn test_from_index_error() {
        assert!(matches!(
            ReconcileError::from(IndexError::Rejected {
                status: 503,
                body: "busy".into()
            }),
            ReconcileError::IndexRejected { status: 503, .. }
        ));
        assert!(matches!(
            ReconcileError::from(IndexError::Unavailable("timeout".into())),
            ReconcileError::IndexUnavailable(_)
        ));
    }
}
