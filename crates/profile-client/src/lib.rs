//! Client library for the profile indexer.
//!
//! Upstream producers use `ProfileClient` to emit a `WriteProfile` signal
//! after changing a profile row.
//!
//! # Example
//!
//! ```rust,no_run
//! use profile_client::{ProfileClient, ReconcileResult};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ProfileClient::connect("http://127.0.0.1:5001").await?;
//!
//!     let result = client
//!         .write_profile("b4d1c5e0-2f0a-4c4e-9d0b-5b8f6a1e7c11")
//!         .await?;
//!     assert_ne!(result, ReconcileResult::Failed);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{ProfileClient, ReconcileResult, DEFAULT_ENDPOINT};
pub use error::ClientError;
