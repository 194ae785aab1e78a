use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::errors::{Error, Result};

use super::routes::{build_router, AppState};

/// Bind the example service and serve until Ctrl+C.
pub async fn start_api_server(config: &ServiceConfig, state: AppState) -> Result<()> {
    let addr = config.socket_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind {}: {}", addr, e)))?;

    info!(bind_address = %addr, service_name = %config.service_name, "Starting HTTP API server");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "API server shutdown listener failed");
            }
        })
        .await?;

    info!("API server shutdown completed");
    Ok(())
}
