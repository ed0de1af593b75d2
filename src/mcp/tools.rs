//! MCP tool surface.
//!
//! Every tool is a thin adapter over [`crate::mcp::operations`]; failures are
//! reported inside the returned text, so the `Err` arm is never used.

use std::sync::Arc;

use poem_mcpserver::{Tools, content::Text};
use tracing::info;

use super::config::resolve_command_timeout;
use super::executor::CommandExecutor;
use super::format::to_pretty_json;
use super::operations::docker::DEFAULT_LOG_LINES;
use super::operations::files::DEFAULT_LIST_PATH;
use super::operations::system::DEFAULT_PROCESS_TOP;
use super::operations::{docker, exec, files, services, system};

/// NAS administration tools over a single shared SSH session.
#[derive(Clone)]
pub struct McpNasTools {
    executor: Arc<CommandExecutor>,
}

impl McpNasTools {
    pub fn new(executor: Arc<CommandExecutor>) -> Self {
        Self { executor }
    }
}

#[Tools]
impl McpNasTools {
    /// Execute a command on the NAS via SSH.
    ///
    /// Use this to run shell commands, check system status, manage files, etc.
    /// Output is stdout, followed by stderr under a `STDERR:` header when present.
    async fn ssh_execute(
        &self,
        /// The shell command to execute on the NAS
        command: String,
        /// Command timeout in seconds (default: 30, env: NAS_COMMAND_TIMEOUT)
        timeout: Option<u64>,
    ) -> Result<Text<String>, String> {
        info!("ssh_execute: {}", command);
        let timeout = resolve_command_timeout(timeout);
        Ok(Text(exec::execute(&self.executor, &command, timeout).await))
    }

    /// Check the SSH connection status to the NAS.
    ///
    /// Returns JSON with `status` ("connected" or "error") and the host, user and
    /// `uname -a` output when connected.
    async fn ssh_status(&self) -> Result<Text<String>, String> {
        let status = exec::check_status(&self.executor).await;
        Ok(Text(to_pretty_json(&status)))
    }

    /// List files and directories at a given path on the NAS.
    async fn ssh_list_files(
        &self,
        /// Directory path to list (default: home directory)
        path: Option<String>,
        /// Include hidden files (default: false)
        all: Option<bool>,
        /// Use long listing format with details (default: true)
        long: Option<bool>,
    ) -> Result<Text<String>, String> {
        let text = files::list_files(
            &self.executor,
            path.as_deref().unwrap_or(DEFAULT_LIST_PATH),
            all.unwrap_or(false),
            long.unwrap_or(true),
        )
        .await;
        Ok(Text(text))
    }

    /// Read the contents of a file on the NAS.
    async fn ssh_read_file(
        &self,
        /// Path to the file to read
        path: String,
        /// Number of lines to read (default: all). Use negative for tail.
        lines: Option<i64>,
    ) -> Result<Text<String>, String> {
        Ok(Text(files::read_file(&self.executor, &path, lines).await))
    }

    /// Write content to a file on the NAS (creates or overwrites).
    async fn ssh_write_file(
        &self,
        /// Path to the file to write
        path: String,
        /// Content to write to the file
        content: String,
        /// Append to file instead of overwriting (default: false)
        append: Option<bool>,
    ) -> Result<Text<String>, String> {
        info!("ssh_write_file: {}", path);
        let text =
            files::write_file(&self.executor, &path, &content, append.unwrap_or(false)).await;
        Ok(Text(text))
    }

    /// Check if a file or directory exists on the NAS.
    ///
    /// Returns JSON with `exists` and, when it exists, the `file` description.
    async fn ssh_file_exists(
        &self,
        /// Path to check
        path: String,
    ) -> Result<Text<String>, String> {
        let response = files::file_exists(&self.executor, &path).await;
        Ok(Text(to_pretty_json(&response)))
    }

    /// Get NAS system information (hostname, OS, uptime, load).
    async fn ssh_system_info(&self) -> Result<Text<String>, String> {
        Ok(Text(system::system_info(&self.executor).await))
    }

    /// Get disk usage information from the NAS.
    async fn ssh_disk_usage(
        &self,
        /// Specific path to check (default: all filesystems)
        path: Option<String>,
    ) -> Result<Text<String>, String> {
        Ok(Text(
            system::disk_usage(&self.executor, path.as_deref()).await,
        ))
    }

    /// Get memory usage information from the NAS.
    async fn ssh_memory_usage(&self) -> Result<Text<String>, String> {
        Ok(Text(system::memory_usage(&self.executor).await))
    }

    /// List running processes on the NAS.
    async fn ssh_process_list(
        &self,
        /// Filter processes by name (grep pattern)
        filter: Option<String>,
        /// Limit to top N processes by CPU (default: 20)
        top: Option<u32>,
    ) -> Result<Text<String>, String> {
        let top = top.unwrap_or(DEFAULT_PROCESS_TOP);
        Ok(Text(
            system::process_list(&self.executor, filter.as_deref(), top).await,
        ))
    }

    /// List Docker containers on the NAS.
    async fn ssh_docker_ps(
        &self,
        /// Show all containers including stopped ones (default: false)
        all: Option<bool>,
    ) -> Result<Text<String>, String> {
        Ok(Text(
            docker::docker_ps(&self.executor, all.unwrap_or(false)).await,
        ))
    }

    /// Get logs from a Docker container on the NAS.
    async fn ssh_docker_logs(
        &self,
        /// Container name or ID
        container: String,
        /// Number of lines to show (default: 100)
        lines: Option<u32>,
    ) -> Result<Text<String>, String> {
        let lines = lines.unwrap_or(DEFAULT_LOG_LINES);
        Ok(Text(
            docker::docker_logs(&self.executor, &container, lines).await,
        ))
    }

    /// Check status of a service on the NAS (systemctl/service).
    async fn ssh_service_status(
        &self,
        /// Service name to check
        service: String,
    ) -> Result<Text<String>, String> {
        Ok(Text(
            services::service_status(&self.executor, &service).await,
        ))
    }
}
