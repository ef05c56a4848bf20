//! HTTP server lifecycle.
//!
//! [`spawn_observer`] binds eagerly, so a taken port fails at startup, then
//! serves on a background task alongside the game service.

use std::net::SocketAddr;
use std::sync::Arc;

use sprout_core::config::InfrastructureConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::router::build_router;
use crate::state::AppState;

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

async fn bind(config: &InfrastructureConfig) -> Result<TcpListener, ServerError> {
    let addr_str = config.observer_addr();
    let addr: SocketAddr = addr_str
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address {addr_str}: {e}")))?;

    TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))
}

async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))
}

/// Bind now, then serve on a background task.
///
/// The returned handle finishes only if serving fails; abort it on
/// shutdown.
pub async fn spawn_observer(
    config: &InfrastructureConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, ServerError> {
    let listener = bind(config).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("no local address: {e}")))?;
    info!(%addr, "Garden API listening");

    Ok(tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            error!(error = %e, "Garden API exited with error");
        }
    }))
}
