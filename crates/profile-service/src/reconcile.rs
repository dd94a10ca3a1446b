//! Reconciliation handler.
//!
//! Brings the search index in agreement with one profile record:
//! 1. Fetch the authoritative row
//! 2. Short-circuit if the row is already in sync
//! 3. Apply the row to the index (upsert, or retract if flagged deleted)
//! 4. Persist the outcome (mark indexed, or hard-delete)
//!
//! The index is always written before the store. A crash between 3 and 4
//! leaves the row re-processable; redelivery just repeats the idempotent
//! index write.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use profile_indexing::IndexClient;
use profile_storage::{RecordStore, StoreError};

use crate::error::ReconcileError;

/// Successful terminal states of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Index written and outcome persisted
    Indexed,
    /// Row was already in sync; no I/O beyond the fetch
    AlreadyIndexed,
}

/// Orchestrates fetch, index and persist for a single record.
///
/// Holds no per-record state: concurrent calls coordinate only through the
/// store's version check.
#[derive(Clone)]
pub struct ReconciliationHandler {
    store: Arc<dyn RecordStore>,
    index: Arc<dyn IndexClient>,
}

impl ReconciliationHandler {
    pub fn new(store: Arc<dyn RecordStore>, index: Arc<dyn IndexClient>) -> Self {
        Self { store, index }
    }

    /// Reconcile the record named by a caller-supplied identifier.
    ///
    /// An unparsable identifier fails with `InvalidArgument` before any I/O.
    pub async fn reconcile(&self, raw_id: &str) -> Result<ReconcileOutcome, ReconcileError> {
        let id = Uuid::parse_str(raw_id).map_err(|e| {
            ReconcileError::InvalidArgument(format!("profile id '{}': {}", raw_id, e))
        })?;
        self.reconcile_id(id).await
    }

    /// Reconcile the record with the given identifier.
    pub async fn reconcile_id(&self, id: Uuid) -> Result<ReconcileOutcome, ReconcileError> {
        let mut record = self.store.get(id).await.map_err(|e| {
            warn!(profile_id = %id, error = %e, "Profile fetch failed");
            ReconcileError::from(e)
        })?;

        if record.is_settled() {
            debug!(profile_id = %id, version = record.version, "Profile already indexed");
            return Ok(ReconcileOutcome::AlreadyIndexed);
        }

        let action = self.index.apply(&record).await.map_err(|e| {
            warn!(
                profile_id = %id,
                backend = self.index.name(),
                error = %e,
                "Index update failed, record left unchanged"
            );
            ReconcileError::from(e)
        })?;

        if record.is_deleted {
            match self.store.delete(&record).await {
                Ok(()) => {}
                Err(StoreError::AlreadyDeleted(_)) => {
                    debug!(profile_id = %id, "Profile row already removed by a concurrent call");
                }
                Err(e) => {
                    warn!(profile_id = %id, error = %e, "Profile delete failed");
                    return Err(e.into());
                }
            }
        } else {
            self.store.mark_indexed(&mut record).await.map_err(|e| {
                warn!(
                    profile_id = %id,
                    version = record.version,
                    error = %e,
                    "Mark indexed failed"
                );
                ReconcileError::from(e)
            })?;
        }

        info!(
            profile_id = %id,
            version = record.version,
            action = ?action,
            "Profile reconciled"
        );
        Ok(ReconcileOutcome::Indexed)
    }
}
