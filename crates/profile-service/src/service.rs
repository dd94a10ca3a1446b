//! WriteProfile RPC implementation.
//!
//! Thin adapter between the tonic surface and [`ReconciliationHandler`]:
//! validates the request envelope, runs the reconciliation, and maps the
//! outcome to the wire result.

use tonic::{Request, Response, Status};
use tracing::debug;

use crate::error::{ReconcileError, RESULT_INDEXED};
use crate::pb::{
    profile_service_server::ProfileService, ProfileRequest, ProfileResponse,
    ReconcileResult as ProtoReconcileResult,
};
use crate::reconcile::{ReconcileOutcome, ReconciliationHandler};

impl From<ReconcileOutcome> for ProtoReconcileResult {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::Indexed => ProtoReconcileResult::Indexed,
            ReconcileOutcome::AlreadyIndexed => ProtoReconcileResult::AlreadyIndexed,
        }
    }
}

/// Implementation of the ProfileService gRPC service.
pub struct ProfileServiceImpl {
    handler: ReconciliationHandler,
}

impl ProfileServiceImpl {
    pub fn new(handler: ReconciliationHandler) -> Self {
        Self { handler }
    }
}

#[tonic::async_trait]
impl ProfileService for ProfileServiceImpl {
    /// Reconcile one profile with the search index.
    ///
    /// Success returns result "Indexed" (fresh or already in sync); every
    /// failure returns a status tagged `x-reconcile-result: Failed`.
    async fn write_profile(
        &self,
        request: Request<ProfileRequest>,
    ) -> Result<Response<ProfileResponse>, Status> {
        let req = request.into_inner();

        let entry = req.profile_entry.ok_or_else(|| {
            Status::from(ReconcileError::InvalidArgument(
                "profile_entry is required".to_string(),
            ))
        })?;

        debug!(profile_id = %entry.id, "WriteProfile received");

        let outcome = self.handler.reconcile(&entry.id).await?;

        Ok(Response::new(ProfileResponse {
            result: RESULT_INDEXED.to_string(),
            outcome: ProtoReconcileResult::from(outcome) as i32,
        }))
    }
}
