//! # profile-types
//!
//! Shared domain types for the profile indexer.
//!
//! This crate defines the data structures every other crate agrees on:
//! - [`ProfileRecord`]: the authoritative row owned by the relational store
//! - [`IndexDocument`]: the search-backend projection of a live record
//! - [`Settings`]: layered service configuration
//!
//! ## Usage
//!
//! ```rust
//! use profile_types::{IndexDocument, ProfileRecord};
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod record;

pub use config::{DatabaseSettings, Settings, SolrSettings};
pub use document::IndexDocument;
pub use error::ProfileError;
pub use record::ProfileRecord;
