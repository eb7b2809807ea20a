//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct Config {
    // === Upstream Credentials ===
    /// Long-lived OpenAI API key. Redacted in `Debug` output.
    #[serde(default = "empty_secret")]
    pub openai_api_key: Secret<String>,

    /// Base URL of the OpenAI REST API.
    #[serde(default = "default_base_url")]
    pub openai_base_url: String,

    // === Upstream HTTP Client ===
    /// Total timeout for one session-creation call.
    #[serde(default = "default_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// TCP connect timeout for the upstream client.
    #[serde(default = "default_connect_timeout_ms")]
    pub upstream_connect_timeout_ms: u64,

    // === Server Configuration ===
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub bind_host: IpAddr,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let base = Url::parse(&self.openai_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.openai_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.openai_base_url.clone(),
                reason: format!("unsupported scheme {}", base.scheme()),
            });
        }

        if self.upstream_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "UPSTREAM_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }

        if self.upstream_connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "UPSTREAM_CONNECT_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }

    /// Upstream request timeout.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// Upstream connect timeout.
    pub fn upstream_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_connect_timeout_ms)
    }

    /// Whether an API key is present (never reveals its value).
    pub fn has_api_key(&self) -> bool {
        !self.openai_api_key.expose_secret().trim().is_empty()
    }
}
