//! ChatKit session types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Session configuration forwarded upstream as-is.
///
/// The service never interprets these fields; integrators supply whatever
/// the upstream contract expects (workflow, user, expiry, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionConfig(pub Map<String, Value>);

impl SessionConfig {
    /// An empty configuration object (`{}`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no fields are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for SessionConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Session returned by the upstream API.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Short-lived secret the frontend uses to talk to the session.
    pub client_secret: String,
    /// Every other field, kept opaque.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Session carrying only a client secret.
    pub fn with_client_secret(client_secret: impl Into<String>) -> Self {
        Self {
            client_secret: client_secret.into(),
            extra: Map::new(),
        }
    }

    /// Upstream session id, if present.
    pub fn id(&self) -> Option<&str> {
        self.extra.get("id").and_then(Value::as_str)
    }
}
