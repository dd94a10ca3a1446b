//! gRPC service implementation for the profile indexer.
//!
//! Provides:
//! - WriteProfile RPC reconciling one profile with the search index
//! - Health check endpoint
//! - Reflection endpoint for debugging

pub mod error;
pub mod reconcile;
pub mod server;
pub mod service;

#[cfg(test)]
mod test_support;

pub mod pb {
    tonic::include_proto!("profiles");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("profile_descriptor");
}

pub use error::{ReconcileError, RESULT_FAILED, RESULT_INDEXED, RESULT_METADATA_KEY};
pub use reconcile::{ReconcileOutcome, ReconciliationHandler};
pub use server::{run_server, run_server_with_shutdown};
pub use service::ProfileServiceImpl;
