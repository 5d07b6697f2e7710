//! Error types for alert-trigger startup.

use thiserror::Error;

/// Errors raised while turning CLI/env configuration into a listen address.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {addr:?}: {reason}")]
    InvalidBind { addr: String, reason: String },
}
