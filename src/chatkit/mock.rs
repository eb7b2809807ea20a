//! Mock session provider for unit testing.
//!
//! This module provides a provider that can be used in tests
//! without making real network requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::UpstreamError;

use super::types::{Session, SessionConfig};
use super::SessionProvider;

/// Failure the mock should simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Simulated timeout.
    Timeout,
    /// Simulated connection failure.
    Network,
    /// Simulated 401.
    Authentication,
    /// Simulated 429.
    RateLimited,
    /// Simulated response without a client secret.
    Malformed,
}

/// Configuration for mock provider behavior.
#[derive(Debug, Clone)]
pub struct MockProviderConfig {
    /// Client secret to hand out.
    pub client_secret: String,
    /// Fail every call with this error instead.
    pub fail_with: Option<MockFailure>,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for MockProviderConfig {
    fn default() -> Self {
        Self {
            client_secret: "secret_123".to_string(),
            fail_with: None,
            latency_ms: 0,
        }
    }
}

/// Mock session provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSessionProvider {
    /// Mock configuration.
    config: MockProviderConfig,
    /// Number of `create_session` calls received.
    calls: Arc<AtomicUsize>,
    /// Configurations received, in call order.
    received: Arc<Mutex<Vec<SessionConfig>>>,
}

impl MockSessionProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider with custom configuration.
    pub fn with_config(config: MockProviderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Provider that always succeeds with the given secret.
    pub fn succeeding(client_secret: impl Into<String>) -> Self {
        Self::with_config(MockProviderConfig {
            client_secret: client_secret.into(),
            ..Default::default()
        })
    }

    /// Provider that always fails with the given failure.
    pub fn failing(failure: MockFailure) -> Self {
        Self::with_config(MockProviderConfig {
            fail_with: Some(failure),
            ..Default::default()
        })
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Configurations received so far.
    pub fn received(&self) -> Vec<SessionConfig> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn create_session(&self, config: SessionConfig) -> Result<Session, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(config);
        }

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        match self.config.fail_with {
            None => Ok(Session::with_client_secret(self.config.client_secret.clone())),
            Some(MockFailure::Timeout) => Err(UpstreamError::Timeout),
            Some(MockFailure::Network) => Err(UpstreamError::Network(
                "Mock connection refused".to_string(),
            )),
            Some(MockFailure::Authentication) => {
                Err(UpstreamError::Authentication { status: 401 })
            }
            Some(MockFailure::RateLimited) => Err(UpstreamError::RateLimited),
            Some(MockFailure::Malformed) => Err(UpstreamError::MalformedResponse(
                "Mock missing field `client_secret`".to_string(),
            )),
        }
    }
}
