//! gRPC server setup with health check and reflection.

use std::net::SocketAddr;

use tonic::transport::Server;
use tonic_health::server::health_reporter;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tracing::info;

use crate::pb::{profile_service_server::ProfileServiceServer, FILE_DESCRIPTOR_SET};
use crate::reconcile::ReconciliationHandler;
use crate::service::ProfileServiceImpl;

/// Run the gRPC server until the process is stopped.
pub async fn run_server(
    addr: SocketAddr,
    handler: ReconciliationHandler,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    run_server_with_shutdown(addr, handler, std::future::pending::<()>()).await
}

/// Run the gRPC server with graceful shutdown support.
///
/// This function:
/// 1. Sets up the health check service
/// 2. Sets up the reflection service
/// 3. Registers the ProfileService
/// 4. Serves until `shutdown_signal` resolves, letting in-flight calls finish
pub async fn run_server_with_shutdown<F>(
    addr: SocketAddr,
    handler: ReconciliationHandler,
    shutdown_signal: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!("Starting gRPC server on {}", addr);

    let (mut health_reporter, health_service) = health_reporter();
    health_reporter
        .set_serving::<ProfileServiceServer<ProfileServiceImpl>>()
        .await;

    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let profile_service = ProfileServiceImpl::new(handler);

    info!("gRPC server ready on {}", addr);

    Server::builder()
        .add_service(health_service)
        .add_service(reflection_service)
        .add_service(ProfileServiceServer::new(profile_service))
        .serve_with_shutdown(addr, shutdown_signal)
        .await?;

    info!("gRPC server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;

    use crate::test_support::FakeIndex;
    use profile_storage::InMemoryRecordStore;

    #[tokio::test]
    async fn test_server_starts_and_shuts_down() {
        let handler = ReconciliationHandler::new(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(FakeIndex::new()),
        );
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            run_server_with_shutdown(addr, handler, async {
                rx.await.ok();
            })
            .await
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(()).ok();

        let result = timeout(Duration::from_secs(5), server_handle).await;
        assert!(result.is_ok());
    }
}
