//! Index client capability trait.

use async_trait::async_trait;

use crate::error::IndexError;
use profile_types::ProfileRecord;

/// What an [`IndexClient::apply`] call did to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// Document created or replaced
    Upserted,
    /// Document removed (or was already absent)
    Retracted,
}

/// Trait for search backends that can mirror a profile record.
///
/// Implementations must treat a retract of an absent document as success,
/// and must not report success unless the backend confirmed the commit.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Upsert the record's document, or retract it if the record is flagged
    /// deleted.
    async fn apply(&self, record: &ProfileRecord) -> Result<IndexOutcome, IndexError>;

    /// Get the name of this backend for logging.
    fn name(&self) -> &str;
}
