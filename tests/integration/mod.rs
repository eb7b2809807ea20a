//! Integration tests for the ChatKit session service.
//!
//! The upstream API is replaced by an in-process axum server, so these run
//! without network access or a real credential.
//! Run with: cargo test --test integration

mod logging;
mod support;
