//! The authoritative profile row.
//!
//! Records are created by the external write path with `is_indexed = false`.
//! Only the reconciliation handler moves them forward: to `is_indexed = true`
//! after a confirmed upsert, or out of the store entirely after a confirmed
//! retract of a record already flagged `is_deleted`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A profile as stored in the system of record.
///
/// `version` is the optimistic-concurrency token: every guarded mutation
/// bumps it by exactly one and fails if the stored value differs from the
/// one carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Globally unique identifier, never reused after deletion
    pub id: Uuid,

    /// Creation time, immutable
    pub created_at: DateTime<Utc>,

    /// Owning user, immutable
    pub profile_user: Uuid,

    /// Display name
    pub profile_name: String,

    /// Picture reference (file name or URL)
    pub profile_picture: String,

    /// Whether the search backend holds this record's last-synchronized state
    pub is_indexed: bool,

    /// Soft-delete flag, precondition for hard deletion
    pub is_deleted: bool,

    /// Optimistic-concurrency version
    pub version: i32,
}

impl ProfileRecord {
    /// Create a fresh, unindexed record at version 1.
    pub fn new(
        id: Uuid,
        created_at: DateTime<Utc>,
        profile_user: Uuid,
        profile_name: impl Into<String>,
        profile_picture: impl Into<String>,
    ) -> Self {
        Self {
            id,
            created_at,
            profile_user,
            profile_name: profile_name.into(),
            profile_picture: profile_picture.into(),
            is_indexed: false,
            is_deleted: false,
            version: 1,
        }
    }

    /// Builder-style setter for the indexed flag.
    pub fn with_indexed(mut self, is_indexed: bool) -> Self {
        self.is_indexed = is_indexed;
        self
    }

    /// Builder-style setter for the deleted flag.
    pub fn with_deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    /// Builder-style setter for the version.
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// True when a reconciliation has nothing left to do.
    ///
    /// A deleted record is never settled while its row still exists: it must
    /// still be retracted and hard-deleted, whatever `is_indexed` says.
    pub fn is_settled(&self) -> bool {
        self.is_indexed && !self.is_deleted
    }
}
