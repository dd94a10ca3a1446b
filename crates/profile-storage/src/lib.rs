//! Record store for the profile indexer.
//!
//! The store is the sole gateway to the authoritative profile row. It
//! enforces two invariants on behalf of the reconciliation handler:
//! - Guarded mutations only apply when the caller's `version` matches
//!   the stored one, and bump it by exactly one
//! - A row is only hard-deleted once it is already flagged `is_deleted`
//!
//! Backends:
//! - [`PgRecordStore`]: Postgres via sqlx, the production backend
//! - [`InMemoryRecordStore`]: same contract over a locked map, for tests
//!   and local runs

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::InMemoryRecordStore;
pub use postgres::{PgRecordStore, ProfileRow};
pub use store::RecordStore;
