//! Serializable result types for NAS tools.
//!
//! [`ExecutionResult`] is the normalized outcome of running one remote
//! command. The JSON-returning tools (`ssh_status`, `ssh_file_exists`) use
//! their own small response objects, serialized with keys in declaration
//! order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of attempting to run one command on the NAS.
///
/// `error` is set only when the command could not be run at all; in that
/// case `exit_code`, `stdout` and `stderr` are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Result for a command that ran to completion.
    pub fn completed(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: exit_code == 0,
            exit_code: Some(exit_code),
            stdout: Some(stdout.into()),
            stderr: Some(stderr.into()),
            error: None,
        }
    }

    /// Result for a command that could not be run.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: None,
            stdout: None,
            stderr: None,
            error: Some(error.into()),
        }
    }

    /// Captured stdout, or an empty string when the command never ran.
    pub fn stdout(&self) -> &str {
        self.stdout.as_deref().unwrap_or_default()
    }

    /// Captured stderr, or an empty string when the command never ran.
    pub fn stderr(&self) -> &str {
        self.stderr.as_deref().unwrap_or_default()
    }
}

/// Response of the `ssh_status` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
    /// "connected" or "error"
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Output of `hostname && uname -a`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of the `ssh_file_exists` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileExistsResponse {
    pub exists: bool,
    /// Output of `file <path>` when the path exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}
