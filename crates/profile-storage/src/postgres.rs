//! Postgres-backed record store.
//!
//! Schema (owned by the upstream write path):
//!
//! ```sql
//! CREATE TABLE profiles (
//!     id              uuid PRIMARY KEY,
//!     created_at      timestamptz NOT NULL DEFAULT now(),
//!     profile_user    uuid NOT NULL,
//!     profile_name    text NOT NULL,
//!     profile_picture text NOT NULL,
//!     is_indexed      boolean NOT NULL DEFAULT false,
//!     is_deleted      boolean NOT NULL DEFAULT false,
//!     version         integer NOT NULL DEFAULT 1
//! );
//! ```

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::RecordStore;
use profile_types::{DatabaseSettings, ProfileRecord};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_PROFILE: &str = r#"
    SELECT id, created_at, profile_user, profile_name,
           profile_picture, is_indexed, is_deleted, version
    FROM profiles
    WHERE id = $1
"#;

const MARK_INDEXED: &str = r#"
    UPDATE profiles
    SET is_indexed = true, version = version + 1
    WHERE id = $1 AND version = $2 AND is_deleted = false
    RETURNING version
"#;

const DELETE_PROFILE: &str = r#"
    DELETE FROM profiles
    WHERE id = $1 AND is_deleted = true
"#;

const PROFILE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)";

/// Row shape of the `profiles` table.
#[derive(FromRow, Debug)]
pub struct ProfileRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile_user: Uuid,
    pub profile_name: String,
    pub profile_picture: String,
    pub is_indexed: bool,
    pub is_deleted: bool,
    pub version: i32,
}

impl From<ProfileRow> for ProfileRecord {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            profile_user: row.profile_user,
            profile_name: row.profile_name,
            profile_picture: row.profile_picture,
            is_indexed: row.is_indexed,
            is_deleted: row.is_deleted,
            version: row.version,
        }
    }
}

/// Record store over a shared sqlx connection pool.
///
/// Connections are checked out per statement and returned to the pool when
/// the statement future completes or is dropped by a timeout.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgRecordStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Open a pool from settings and verify it with a ping.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        info!(
            max_open = settings.max_open_conns,
            max_idle = settings.max_idle_conns,
            idle_timeout_secs = settings.max_idle_time_secs,
            "Opening Postgres pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_open_conns)
            .min_connections(settings.max_idle_conns)
            .idle_timeout(settings.max_idle_time())
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(&settings.dsn)
            .await?;

        let store = Self::new(pool, settings.timeout());
        store.ping().await?;
        Ok(store)
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), StoreError> {
        tokio::time::timeout(ACQUIRE_TIMEOUT, sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map_err(|_| StoreError::Unavailable("ping timed out".to_string()))??;
        Ok(())
    }

    /// Underlying pool, for callers that own the schema.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        tokio::time::timeout(self.timeout, fut).await.map_err(|_| {
            StoreError::Unavailable(format!("{} timed out after {:?}", op, self.timeout))
        })?
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get(&self, id: Uuid) -> Result<ProfileRecord, StoreError> {
        let row = self
            .bounded("get", async {
                sqlx::query_as::<_, ProfileRow>(SELECT_PROFILE)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        row.map(ProfileRecord::from).ok_or(StoreError::NotFound(id))
    }

    async fn mark_indexed(&self, record: &mut ProfileRecord) -> Result<(), StoreError> {
        let id = record.id;
        let expected = record.version;

        let new_version: Option<i32> = self
            .bounded("mark_indexed", async {
                sqlx::query_scalar::<_, i32>(MARK_INDEXED)
                    .bind(id)
                    .bind(expected)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        match new_version {
            Some(version) => {
                debug!(profile_id = %id, version, "Marked profile indexed");
                record.version = version;
                record.is_indexed = true;
                Ok(())
            }
            None => Err(StoreError::Conflict { id, expected }),
        }
    }

    async fn delete(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let id = record.id;

        let rows = self
            .bounded("delete", async {
                sqlx::query(DELETE_PROFILE)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map(|r| r.rows_affected())
                    .map_err(StoreError::from)
            })
            .await?;

        if rows > 0 {
            debug!(profile_id = %id, "Deleted profile row");
            return Ok(());
        }

        // Nothing deleted: either a racing call removed it, or the row is no
        // longer flagged deleted.
        let exists: bool = self
            .bounded("delete", async {
                sqlx::query_scalar::<_, bool>(PROFILE_EXISTS)
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        if exists {
            Err(StoreError::Conflict {
                id,
                expected: record.version,
            })
        } else {
            Err(StoreError::AlreadyDeleted(id))
        }
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
