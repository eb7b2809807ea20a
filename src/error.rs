//! Unified error types for the session service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

/// Unified error type for the session service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup configuration errors. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment could not be deserialized.
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    /// The API credential is unset or blank.
    #[error("OPENAI_API_KEY is required and must not be empty")]
    MissingApiKey,

    /// The upstream base URL does not parse.
    #[error("OPENAI_BASE_URL {url:?} is invalid: {reason}")]
    InvalidBaseUrl {
        /// The offending URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Any other invalid setting.
    #[error("{0}")]
    Invalid(String),

    /// The upstream HTTP client could not be constructed.
    #[error("failed to build upstream http client: {0}")]
    HttpClient(String),
}

/// Failures of the upstream session-creation call.
///
/// Display output may carry upstream detail and is meant for logs only;
/// callers see an [`ApiError`] instead.
#[derive(Error, Debug, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum UpstreamError {
    /// Request did not complete within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection or transport failure.
    #[error("upstream request failed: {0}")]
    Network(String),

    /// Credential rejected (401/403).
    #[error("upstream rejected credentials: HTTP {status}")]
    Authentication {
        /// HTTP status returned upstream.
        status: u16,
    },

    /// Quota exhausted or rate limited (429).
    #[error("upstream rate limited or quota exceeded")]
    RateLimited,

    /// Any other non-success status.
    #[error("upstream returned HTTP {status}: {body}")]
    Status {
        /// HTTP status returned upstream.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// Success status but the body is not a session.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl UpstreamError {
    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        self.into()
    }
}

/// Error envelope returned to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// The upstream call failed for any reason other than a timeout.
    SessionCreationFailed,
    /// The upstream call timed out.
    UpstreamTimeout,
    /// The request body is not a JSON object.
    InvalidRequest,
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable message, free of upstream detail.
    pub message: &'static str,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionCreationFailed => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }

    /// Response body for this error.
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::SessionCreationFailed => ErrorBody {
                error: "session_creation_failed",
                message: "Failed to create chat session",
            },
            ApiError::UpstreamTimeout => ErrorBody {
                error: "upstream_timeout",
                message: "Timed out creating chat session",
            },
            ApiError::InvalidRequest => ErrorBody {
                error: "invalid_request",
                message: "Request body must be empty or a JSON object",
            },
        }
    }
}

impl From<&UpstreamError> for ApiError {
    fn from(err: &UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout => ApiError::UpstreamTimeout,
            _ => ApiError::SessionCreationFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
