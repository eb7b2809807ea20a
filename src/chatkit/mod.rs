//! ChatKit session API.
//!
//! This module handles:
//! - Session request/response types
//! - The [`SessionProvider`] seam used by the HTTP handlers
//! - The OpenAI-backed client
//! - Mock provider for testing

pub mod client;
pub mod mock;
pub mod types;

use async_trait::async_trait;

use crate::error::UpstreamError;

pub use client::ChatKitClient;
pub use mock::{MockFailure, MockProviderConfig, MockSessionProvider};
pub use types::{Session, SessionConfig};

/// Something that can mint ChatKit sessions.
///
/// Implementations are shared across concurrent requests and must not
/// retry on their own; one call maps to exactly one upstream attempt.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Create a new session from the given configuration.
    async fn create_session(&self, config: SessionConfig) -> Result<Session, UpstreamError>;
}
