//! Minimal HTTP service that mints ChatKit sessions.
//!
//! Two routes:
//!
//! ```text
//! GET  /                     -> {"status": 200, "message": "OpenAI Base"}
//! POST /api/chatkit/session  -> {"client_secret": "..."}
//! ```
//!
//! The session route makes exactly one call to the OpenAI ChatKit sessions
//! API per request and hands the short-lived client secret back to the
//! caller. The long-lived API key stays on the server.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`chatkit`]: Session provider trait, OpenAI client and mock
//! - [`api`]: HTTP handlers and router
//! - [`startup`]: State construction and server lifecycle
//! - [`metrics`]: Session metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod chatkit;
pub mod config;
pub mod error;
pub mod metrics;
pub mod startup;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
