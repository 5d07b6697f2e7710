//! Error types for readiness-demo startup.

use thiserror::Error;

/// Errors raised while validating CLI/env configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {addr:?}: {reason}")]
    InvalidBind { addr: String, reason: String },
}
