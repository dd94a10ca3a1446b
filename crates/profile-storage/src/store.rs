//! Record store capability trait.
//!
//! The reconciliation handler only ever talks to the store through this
//! trait, so another SQL engine can be dropped in without touching the
//! handler's state machine.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use profile_types::ProfileRecord;

/// Gateway to the authoritative profile row.
///
/// Every call is bounded by the backend's deadline and never retried
/// internally.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup by identifier.
    ///
    /// Returns `NotFound` for a missing row and `Unavailable` when the
    /// backend cannot answer in time.
    async fn get(&self, id: Uuid) -> Result<ProfileRecord, StoreError>;

    /// Set `is_indexed = true` if the stored version still equals
    /// `record.version` and the row is not flagged deleted.
    ///
    /// On success `record.version` is replaced with the new stored version.
    /// Returns `Conflict` when nothing matched.
    async fn mark_indexed(&self, record: &mut ProfileRecord) -> Result<(), StoreError>;

    /// Hard-delete a row already flagged `is_deleted`.
    ///
    /// Returns `AlreadyDeleted` when the row is gone, and `Conflict` when it
    /// exists but is no longer flagged deleted.
    async fn delete(&self, record: &ProfileRecord) -> Result<(), StoreError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
