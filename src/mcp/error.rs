//! Error taxonomy for remote command execution.
//!
//! Every failure that can happen while talking to the NAS is one of:
//!
//! 1. **Not configured**: credentials are missing, no connection is attempted.
//! 2. **Authentication**: the server rejected the credentials.
//! 3. **Transport**: SSH protocol or connection-layer failure during connect or exec.
//! 4. **Timeout / other**: anything else, including commands that outlive their timeout.
//!
//! None of these reach tool callers as errors. [`SshError::into_result`] turns
//! each variant into an [`ExecutionResult`] carrying a fixed, human-readable
//! message.
//!
//! # Classification
//!
//! russh reports most failures as free-form messages. [`classify_error`] maps
//! those messages onto the taxonomy by keyword. Authentication keywords are
//! checked first, so "connection closed: authentication failed" is still an
//! authentication error.

use std::time::Duration;

use thiserror::Error;

use super::types::ExecutionResult;

/// Message returned when NAS credentials are missing.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "NAS credentials not configured. Set NAS_HOST, NAS_USER, and NAS_PASSWORD.";

/// Message returned when the server rejects the credentials.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Check username and password.";

/// Authentication error patterns that indicate rejected credentials.
const AUTH_ERRORS: &[&str] = &[
    "authentication failed",
    "password authentication failed",
    "permission denied",
    "auth fail",
    "no authentication",
    "all authentication methods failed",
];

/// Patterns that indicate an SSH protocol or connection-layer failure.
const TRANSPORT_ERRORS: &[&str] = &[
    "ssh",
    "connection refused",
    "connection reset",
    "connection closed",
    "network is unreachable",
    "no route to host",
    "host is down",
    "handshake failed",
    "failed to connect",
    "failed to open channel",
    "failed to execute command",
    "broken pipe",
    "disconnect",
    "kex",
];

#[derive(Debug, Error)]
pub enum SshError {
    #[error("NAS credentials not configured")]
    NotConfigured,

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("{0}")]
    Transport(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

impl SshError {
    /// Convert the failure into the error-shaped [`ExecutionResult`].
    pub fn into_result(self) -> ExecutionResult {
        let message = match self {
            SshError::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            SshError::Authentication(_) => AUTH_FAILED_MESSAGE.to_string(),
            SshError::Transport(msg) => format!("SSH error: {}", msg),
            SshError::Timeout(timeout) => format!(
                "Connection error: Command timed out after {} seconds",
                timeout.as_secs()
            ),
            SshError::Other(msg) => format!("Connection error: {}", msg),
        };
        ExecutionResult::failure(message)
    }
}

impl From<russh::Error> for SshError {
    fn from(err: russh::Error) -> Self {
        classify_error(&err.to_string())
    }
}

/// Classify a free-form error message into an [`SshError`].
///
/// Authentication patterns take precedence over transport patterns.
/// Messages matching neither are reported as [`SshError::Other`].
pub fn classify_error(error: &str) -> SshError {
    let error_lower = error.to_lowercase();

    if AUTH_ERRORS.iter().any(|p| error_lower.contains(p)) {
        return SshError::Authentication(error.to_string());
    }

    if TRANSPORT_ERRORS.iter().any(|p| error_lower.contains(p)) {
        return SshError::Transport(error.to_string());
    }

    SshError::Other(error.to_string())
}
