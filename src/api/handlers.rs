//! HTTP API handlers.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::chatkit::{SessionConfig, SessionProvider};
use crate::error::ApiError;
use crate::metrics;

/// Application state shared with handlers.
///
/// Built once at startup; everything inside is read-only.
#[derive(Clone)]
pub struct AppState {
    /// Upstream session provider.
    pub provider: Arc<dyn SessionProvider>,
}

impl AppState {
    /// Create new app state around a provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: SessionProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Create app state from an already shared provider.
    pub fn from_shared(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }
}

/// Root response.
#[derive(Debug, Serialize)]
pub struct BaseResponse {
    /// Always 200.
    pub status: u16,
    /// Fixed banner.
    pub message: &'static str,
}

/// Session creation response.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Client secret handed to the frontend.
    pub client_secret: String,
}

/// Root handler - always returns the fixed banner.
pub async fn root() -> impl IntoResponse {
    Json(BaseResponse {
        status: 200,
        message: "OpenAI Base",
    })
}

/// Session handler - mints one upstream session per call.
///
/// An empty body sends `{}` upstream; a JSON object body is forwarded as the
/// session configuration.
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>, ApiError> {
    let config = parse_session_config(&body)?;

    match state.provider.create_session(config).await {
        Ok(session) => {
            metrics::inc_sessions_created();
            info!(session_id = session.id().unwrap_or("-"), "Session created");
            Ok(Json(SessionResponse {
                client_secret: session.client_secret,
            }))
        }
        Err(e) => {
            metrics::inc_session_failures(e.reason());
            warn!(reason = e.reason(), error = %e, "Session creation failed");
            Err(ApiError::from(&e))
        }
    }
}

fn parse_session_config(body: &[u8]) -> Result<SessionConfig, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SessionConfig::empty());
    }

    serde_json::from_slice(body).map_err(|_| ApiError::InvalidRequest)
}
