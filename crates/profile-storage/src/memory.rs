//! In-memory record store.
//!
//! Implements the same guarded-mutation contract as [`PgRecordStore`] over a
//! mutex-protected map. Also exposes hooks that the Postgres store has no
//! use for: seeding rows, bumping a version behind the handler's back,
//! counting writes and simulating an outage.
//!
//! [`PgRecordStore`]: crate::PgRecordStore

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::RecordStore;
use profile_types::ProfileRecord;

#[derive(Default)]
pub struct InMemoryRecordStore {
    rows: Mutex<HashMap<Uuid, ProfileRecord>>,
    writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given rows.
    pub fn with_records(records: impl IntoIterator<Item = ProfileRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert or replace a row as the external write path would.
    pub fn insert(&self, record: ProfileRecord) {
        self.rows().insert(record.id, record);
    }

    /// Current stored state of a row.
    pub fn snapshot(&self, id: Uuid) -> Option<ProfileRecord> {
        self.rows().get(&id).cloned()
    }

    /// Simulate a concurrent writer: bump the stored version by one.
    ///
    /// Returns the new version, or `None` if the row does not exist.
    pub fn bump_version(&self, id: Uuid) -> Option<i32> {
        let mut rows = self.rows();
        let row = rows.get_mut(&id)?;
        row.version += 1;
        Some(row.version)
    }

    /// Simulate the external write path flagging a row deleted.
    pub fn flag_deleted(&self, id: Uuid) -> Option<i32> {
        let mut rows = self.rows();
        let row = rows.get_mut(&id)?;
        row.is_deleted = true;
        row.version += 1;
        Some(row.version)
    }

    /// Number of successful guarded mutations applied so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> MutexGuard<'_, HashMap<Uuid, ProfileRecord>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, id: Uuid) -> Result<ProfileRecord, StoreError> {
        self.check_available()?;
        self.snapshot(id).ok_or(StoreError::NotFound(id))
    }

    async fn mark_indexed(&self, record: &mut ProfileRecord) -> Result<(), StoreError> {
        self.check_available()?;
        let mut rows = self.rows();

        let row = rows
            .get_mut(&record.id)
            .filter(|row| row.version == record.version && !row.is_deleted)
            .ok_or(StoreError::Conflict {
                id: record.id,
                expected: record.version,
            })?;

        row.is_indexed = true;
        row.version += 1;
        record.is_indexed = true;
        record.version = row.version;
        self.writes.fetch_add(1, Ordering::SeqCst);

        debug!(profile_id = %record.id, version = record.version, "Marked profile indexed");
        Ok(())
    }

    async fn delete(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        self.check_available()?;
        let mut rows = self.rows();

        match rows.get(&record.id).map(|row| row.is_deleted) {
            None => Err(StoreError::AlreadyDeleted(record.id)),
            Some(false) => Err(StoreError::Conflict {
                id: record.id,
                expected: record.version,
            }),
            Some(true) => {
                rows.remove(&record.id);
                self.writes.fetch_add(1, Ordering::SeqCst);
                debug!(profile_id = %record.id, "Deleted profile row");
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}
