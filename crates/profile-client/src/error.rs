//! Error types for the profile client.

use thiserror::Error;

use profile_service::{RESULT_FAILED, RESULT_METADATA_KEY};

/// Errors that can occur when using the profile client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to connect to the daemon
    #[error("Connection failed: {0}")]
    Connection(#[from] tonic::transport::Error),

    /// RPC call failed
    #[error("RPC failed: {0}")]
    Rpc(#[from] tonic::Status),

    /// Invalid endpoint URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ClientError {
    /// True when the daemon answered and reported the reconciliation as failed.
    ///
    /// Transport errors and statuses without the result tag return false.
    pub fn is_failed_reconcile(&self) -> bool {
        match self {
            ClientError::Rpc(status) => status
                .metadata()
                .get(RESULT_METADATA_KEY)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == RESULT_FAILED),
            _ => false,
        }
    }

    /// gRPC code of a failed call, if the daemon answered at all.
    pub fn code(&self) -> Option<tonic::Code> {
        match self {
            ClientError::Rpc(status) => Some(status.code()),
            _ => None,
        }
    }
}
