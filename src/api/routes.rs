//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{create_session, root, AppState};

/// Session creation path.
pub const SESSION_PATH: &str = "/api/chatkit/session";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(SESSION_PATH, post(create_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
