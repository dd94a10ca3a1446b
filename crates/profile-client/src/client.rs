//! Profile client for connecting to the daemon.

use std::fmt;

use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info};

use profile_service::pb::{
    profile_service_client::ProfileServiceClient, ProfileEntry, ProfileRequest, ProfileResponse,
    ReconcileResult as ProtoReconcileResult,
};
use profile_service::RESULT_INDEXED;

use crate::error::ClientError;

/// Default endpoint for the profile indexer daemon.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001";

/// Caller-visible result of one `WriteProfile` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileResult {
    /// Document written or retracted, row updated
    Indexed,
    /// Row was already in sync; nothing was touched
    AlreadyIndexed,
    Failed,
}

impl ReconcileResult {
    /// True for both success outcomes.
    pub fn is_success(&self) -> bool {
        !matches!(self, ReconcileResult::Failed)
    }
}

impl From<&ProfileResponse> for ReconcileResult {
    fn from(resp: &ProfileResponse) -> Self {
        if resp.result != RESULT_INDEXED {
            return ReconcileResult::Failed;
        }
        match ProtoReconcileResult::try_from(resp.outcome) {
            Ok(ProtoReconcileResult::Indexed) => ReconcileResult::Indexed,
            Ok(ProtoReconcileResult::AlreadyIndexed) => ReconcileResult::AlreadyIndexed,
            // Older daemons only set the result string.
            Ok(ProtoReconcileResult::Unspecified) => ReconcileResult::Indexed,
            Ok(ProtoReconcileResult::Failed) | Err(_) => ReconcileResult::Failed,
        }
    }
}

impl fmt::Display for ReconcileResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReconcileResult::Indexed => "Indexed",
            ReconcileResult::AlreadyIndexed => "AlreadyIndexed",
            ReconcileResult::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// Client for communicating with the profile indexer daemon.
#[derive(Clone)]
pub struct ProfileClient {
    inner: ProfileServiceClient<Channel>,
}

impl ProfileClient {
    /// Connect to the profile indexer daemon.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidEndpoint` if the URL does not parse and
    /// `ClientError::Connection` if the daemon cannot be reached.
    pub async fn connect(endpoint: &str) -> Result<Self, ClientError> {
        info!("Connecting to profile indexer at {}", endpoint);
        let endpoint = Endpoint::from_shared(endpoint.to_string())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        let channel = endpoint.connect().await?;
        Ok(Self {
            inner: ProfileServiceClient::new(channel),
        })
    }

    /// Connect to the default endpoint.
    pub async fn connect_default() -> Result<Self, ClientError> {
        Self::connect(DEFAULT_ENDPOINT).await
    }

    /// Signal that the profile row `id` changed and must be reconciled.
    ///
    /// A failed reconciliation surfaces as `ClientError::Rpc`; use
    /// [`ClientError::is_failed_reconcile`] to tell it apart from transport
    /// trouble.
    pub async fn write_profile(&mut self, id: &str) -> Result<ReconcileResult, ClientError> {
        debug!(profile_id = %id, "WriteProfile request");

        let request = tonic::Request::new(ProfileRequest {
            profile_entry: Some(ProfileEntry { id: id.to_string() }),
        });
        let response = self.inner.write_profile(request).await?;
        let result = ReconcileResult::from(response.get_ref());

        debug!(profile_id = %id, %result, "WriteProfile response");
        Ok(result)
    }

    /// Reconcile by typed identifier.
    pub async fn write_profile_id(
        &mut self,
        id: uuid::Uuid,
    ) -> Result<ReconcileResult, ClientError> {
        self.write_profile(&id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(result: &str, outcome: ProtoReconcileResult) -> ProfileResponse {
        ProfileResponse {
            result: result.to_string(),
            outcome: outcome as i32,
        }
    }

    #[test]
    fn test_result_from_response() {
        assert_eq!(
            ReconcileResult::from(&response("Indexed", ProtoReconcileResult::Indexed)),
            ReconcileResult::Indexed
        );
        assert_eq!(
            ReconcileResult::from(&response("Indexed", ProtoReconcileResult::AlreadyIndexed)),
            ReconcileResult::AlreadyIndexed
        );
        assert_eq!(
            ReconcileResult::from(&response("Indexed", ProtoReconcileResult::Unspecified)),
            ReconcileResult::Indexed
        );
        assert_eq!(
            ReconcileResult::from(&response("Failed", ProtoReconcileResult::Indexed)),
            ReconcileResult::Failed
        );
    }

    #[test]
    fn test_unknown_outcome_is_failed() {
        let resp = ProfileResponse {
            result: "Indexed".to_string(),
            outcome: 42,
        };
        assert_eq!(ReconcileResult::from(&resp), ReconcileResult::Failed);
    }

    #[test]
    fn test_result_display() {
        assert_eq!(ReconcileResult::AlreadyIndexed.to_string(), "AlreadyIndexed");
        assert!(ReconcileResult::AlreadyIndexed.is_success());
        assert!(!ReconcileResult::Failed.is_success());
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_endpoint() {
        let err = ProfileClient::connect("not a uri").await.err().unwrap();
        assert!(matches!(err, ClientError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn test_connect_fails_without_daemon() {
        let err = ProfileClient::connect("http://127.0.0.1:9").await.err().unwrap();
        assert!(matches!(err, ClientError::Connection(_)));
    }
}
