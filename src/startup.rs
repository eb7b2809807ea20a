//! Application startup.
//!
//! Configuration is validated and the upstream client built before any
//! socket is bound, so a bad credential never reaches the serving stage.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::chatkit::ChatKitClient;
use crate::config::Config;
use crate::error::Result;
use crate::utils::shutdown_signal;

/// Validate configuration and build shared state around the real client.
pub fn build_state(config: &Config) -> Result<AppState> {
    config.validate()?;
    let client = ChatKitClient::new(config)?;
    Ok(AppState::from_shared(Arc::new(client)))
}

/// Bind the configured address. Only call after [`build_state`] succeeded.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}
