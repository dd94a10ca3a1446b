//! Search index client for the profile indexer.
//!
//! The index client is the only component allowed to talk to the search
//! backend. It hides the backend's two update verbs behind
//! [`IndexClient::apply`]:
//! - a live record becomes an upsert of its [`IndexDocument`]
//! - a record flagged deleted becomes a retract by identifier
//!
//! Each call is a standalone commit; nothing is buffered or retried here.
//!
//! [`IndexDocument`]: profile_types::IndexDocument

pub mod client;
pub mod error;
pub mod solr;

pub use client::{IndexClient, IndexOutcome};
pub use error::IndexError;
pub use solr::SolrIndexClient;
