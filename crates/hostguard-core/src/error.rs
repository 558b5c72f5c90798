//! Error types for hostguard core.
//!
//! Verification outcomes are [`crate::Verdict`] values, not errors. These
//! errors only cover setting the verifier up.

use thiserror::Error;

/// Core error type.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid JSON.
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
