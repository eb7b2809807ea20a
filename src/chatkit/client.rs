//! OpenAI ChatKit API client wrapper.

use std::time::Instant;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{ConfigError, UpstreamError};
use crate::metrics;

use super::types::{Session, SessionConfig};
use super::SessionProvider;

/// Beta header required by the ChatKit endpoints.
pub const CHATKIT_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "chatkit_beta=v1");

/// Longest upstream error body kept for logs.
const MAX_ERROR_BODY: usize = 512;

/// ChatKit session API client.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct ChatKitClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Long-lived API key.
    api_key: Secret<String>,
}

impl ChatKitClient {
    /// Create a client from validated config.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .connect_timeout(config.upstream_connect_timeout())
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: Secret::new(config.openai_api_key.expose_secret().clone()),
        })
    }

    /// Sessions endpoint URL.
    pub fn sessions_url(&self) -> String {
        format!("{}/chatkit/sessions", self.base_url)
    }

    /// Strip the credential from text that may end up in logs.
    fn scrub(&self, text: &str) -> String {
        let key = self.api_key.expose_secret();
        let scrubbed = if key.is_empty() {
            text.to_string()
        } else {
            text.replace(key.as_str(), "[REDACTED]")
        };
        scrubbed.chars().take(MAX_ERROR_BODY).collect()
    }

    fn transport_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Network(self.scrub(&err.without_url().to_string()))
        }
    }
}

#[async_trait]
impl SessionProvider for ChatKitClient {
    #[instrument(skip_all, fields(config_fields = config.0.len()))]
    async fn create_session(&self, config: SessionConfig) -> Result<Session, UpstreamError> {
        let start = Instant::now();
        debug!("Creating ChatKit session");

        let result = self
            .http
            .post(self.sessions_url())
            .bearer_auth(self.api_key.expose_secret())
            .header(CHATKIT_BETA_HEADER.0, CHATKIT_BETA_HEADER.1)
            .json(&config)
            .send()
            .await;

        metrics::record_upstream_latency(start);

        let response = result.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let err = match status.as_u16() {
                401 | 403 => UpstreamError::Authentication {
                    status: status.as_u16(),
                },
                429 => UpstreamError::RateLimited,
                code => {
                    let body = response.text().await.unwrap_or_default();
                    UpstreamError::Status {
                        status: code,
                        body: self.scrub(&body),
                    }
                }
            };
            warn!(status = status.as_u16(), "ChatKit session request rejected");
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let session: Session = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        debug!(session_id = session.id().unwrap_or("-"), "ChatKit session created");

        Ok(session)
    }
}
