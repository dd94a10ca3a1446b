//! Test doubles for the index client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Barrier;
use uuid::Uuid;

use profile_indexing::{IndexClient, IndexError, IndexOutcome};
use profile_types::ProfileRecord;

type ApplyHook = Box<dyn Fn(&ProfileRecord) + Send + Sync>;

enum Failure {
    Unavailable,
    Rejected(u16),
}

/// Index client that records calls instead of talking to a backend.
#[derive(Default)]
pub(crate) struct FakeIndex {
    calls: AtomicUsize,
    applied: Mutex<Vec<(Uuid, IndexOutcome)>>,
    failure: Option<Failure>,
    hook: Option<ApplyHook>,
    barrier: Option<Arc<Barrier>>,
}

impl FakeIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            failure: Some(Failure::Unavailable),
            ..Self::default()
        }
    }

    pub(crate) fn rejecting(status: u16) -> Self {
        Self {
            failure: Some(Failure::Rejected(status)),
            ..Self::default()
        }
    }

    /// Run `hook` after the call is counted, before the outcome is returned.
    pub(crate) fn with_hook(mut self, hook: impl Fn(&ProfileRecord) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Hold every call until the barrier trips.
    pub(crate) fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn applied(&self) -> Vec<(Uuid, IndexOutcome)> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexClient for FakeIndex {
    async fn apply(&self, record: &ProfileRecord) -> Result<IndexOutcome, IndexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(hook) = &self.hook {
            hook(record);
        }

        match &self.failure {
            Some(Failure::Unavailable) => {
                return Err(IndexError::Unavailable("connection refused".to_string()))
            }
            Some(Failure::Rejected(status)) => {
                return Err(IndexError::Rejected {
                    status: *status,
                    body: "rejected".to_string(),
                })
            }
            None => {}
        }

        let outcome = if record.is_deleted {
            IndexOutcome::Retracted
        } else {
            IndexOutcome::Upserted
        };
        self.applied.lock().unwrap().push((record.id, outcome));
        Ok(outcome)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// The canonical sample record: unindexed, live, version 1.
pub(crate) fn jon_doe() -> ProfileRecord {
    ProfileRecord::new(
        Uuid::new_v4(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Uuid::new_v4(),
        "Jon Doe",
        "p.jpg",
    )
}
