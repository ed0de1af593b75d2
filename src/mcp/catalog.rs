//! Direct-call tool catalog.
//!
//! Exposes the same 13 tools as the MCP server for embedding in other
//! tool-calling frameworks: callers list [`ToolDef`]s (name, description,
//! JSON Schema of the arguments) and invoke a tool by name with a JSON
//! argument object. Arguments are deserialized into typed inputs with the
//! same defaults as the MCP tools; all work is delegated to
//! [`crate::mcp::operations`].

use std::sync::Arc;

use schemars::{JsonSchema, SchemaGenerator};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::config::resolve_command_timeout;
use super::executor::CommandExecutor;
use super::format::to_pretty_json;
use super::operations::docker::DEFAULT_LOG_LINES;
use super::operations::files::DEFAULT_LIST_PATH;
use super::operations::system::DEFAULT_PROCESS_TOP;
use super::operations::{docker, exec, files, services, system};

/// Prefix shared by every tool name.
pub const TOOL_PREFIX: &str = "ssh_";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Metadata for one tool.
#[derive(Debug, Clone)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EmptyInput {}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExecuteInput {
    /// The shell command to execute on the NAS
    pub command: String,
    /// Command timeout in seconds (default: 30)
    #[serde(default)]
    #[schemars(schema_with = "crate::mcp::schema::uint")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListFilesInput {
    /// Directory path to list (default: home directory)
    #[serde(default = "default_list_path")]
    pub path: String,
    /// Include hidden files
    #[serde(default)]
    pub all: bool,
    /// Use long listing format with details
    #[serde(default = "default_true")]
    pub long: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadFileInput {
    /// Path to the file to read
    pub path: String,
    /// Number of lines to read (default: all). Use negative for tail.
    #[serde(default)]
    pub lines: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteFileInput {
    /// Path to the file to write
    pub path: String,
    /// Content to write to the file
    pub content: String,
    /// Append to file instead of overwriting
    #[serde(default)]
    pub append: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PathInput {
    /// Path to check
    pub path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DiskUsageInput {
    /// Specific path to check (default: all filesystems)
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProcessListInput {
    /// Filter processes by name (grep pattern)
    #[serde(default)]
    pub filter: Option<String>,
    /// Limit to top N processes by CPU/memory
    #[serde(default = "default_process_top")]
    #[schemars(schema_with = "crate::mcp::schema::uint")]
    pub top: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DockerPsInput {
    /// Show all containers (including stopped)
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DockerLogsInput {
    /// Container name or ID
    pub container: String,
    /// Number of lines to show
    #[serde(default = "default_log_lines")]
    #[schemars(schema_with = "crate::mcp::schema::uint")]
    pub lines: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ServiceStatusInput {
    /// Service name to check
    pub service: String,
}

fn default_list_path() -> String {
    DEFAULT_LIST_PATH.to_string()
}

fn default_true() -> bool {
    true
}

fn default_process_top() -> u32 {
    DEFAULT_PROCESS_TOP
}

fn default_log_lines() -> u32 {
    DEFAULT_LOG_LINES
}

fn schema_of<T: JsonSchema>() -> Value {
    let schema = SchemaGenerator::default().into_root_schema_for::<T>();
    serde_json::to_value(&schema).unwrap_or(Value::Null)
}

fn def<T: JsonSchema>(name: &'static str, description: &'static str) -> ToolDef {
    ToolDef {
        name,
        description,
        input_schema: schema_of::<T>(),
    }
}

/// The tool catalog bound to one executor.
#[derive(Clone)]
pub struct ToolCatalog {
    executor: Arc<CommandExecutor>,
}

impl ToolCatalog {
    pub fn new(executor: Arc<CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Definitions of every tool, in catalog order.
    pub fn definitions() -> Vec<ToolDef> {
        vec![
            def::<ExecuteInput>(
                "ssh_execute",
                "Execute a command on the NAS via SSH. Use this to run shell commands, check system status, manage files, etc.",
            ),
            def::<EmptyInput>("ssh_status", "Check the SSH connection status to the NAS."),
            def::<ListFilesInput>(
                "ssh_list_files",
                "List files and directories at a given path on the NAS.",
            ),
            def::<ReadFileInput>("ssh_read_file", "Read the contents of a file on the NAS."),
            def::<WriteFileInput>(
                "ssh_write_file",
                "Write content to a file on the NAS (creates or overwrites).",
            ),
            def::<PathInput>(
                "ssh_file_exists",
                "Check if a file or directory exists on the NAS.",
            ),
            def::<EmptyInput>(
                "ssh_system_info",
                "Get NAS system information (hostname, OS, uptime, load).",
            ),
            def::<DiskUsageInput>("ssh_disk_usage", "Get disk usage information from the NAS."),
            def::<EmptyInput>(
                "ssh_memory_usage",
                "Get memory usage information from the NAS.",
            ),
            def::<ProcessListInput>("ssh_process_list", "List running processes on the NAS."),
            def::<DockerPsInput>("ssh_docker_ps", "List Docker containers on the NAS."),
            def::<DockerLogsInput>(
                "ssh_docker_logs",
                "Get logs from a Docker container on the NAS.",
            ),
            def::<ServiceStatusInput>(
                "ssh_service_status",
                "Check status of a service on the NAS (systemctl/service).",
            ),
        ]
    }

    /// Invoke a tool by name with a JSON object of arguments.
    ///
    /// `null` is accepted as an empty argument object.
    pub async fn call(&self, name: &str, args: Value) -> Result<String, CatalogError> {
        debug!("Catalog call: {}", name);
        let executor = self.executor.as_ref();

        let output = match name {
            "ssh_execute" => {
                let input: ExecuteInput = parse(name, args)?;
                exec::execute(
                    executor,
                    &input.command,
                    resolve_command_timeout(input.timeout),
                )
                .await
            }
            "ssh_status" => {
                let _: EmptyInput = parse(name, args)?;
                to_pretty_json(&exec::check_status(executor).await)
            }
            "ssh_list_files" => {
                let input: ListFilesInput = parse(name, args)?;
                files::list_files(executor, &input.path, input.all, input.long).await
            }
            "ssh_read_file" => {
                let input: ReadFileInput = parse(name, args)?;
                files::read_file(executor, &input.path, input.lines).await
            }
            "ssh_write_file" => {
                let input: WriteFileInput = parse(name, args)?;
                files::write_file(executor, &input.path, &input.content, input.append).await
            }
            "ssh_file_exists" => {
                let input: PathInput = parse(name, args)?;
                to_pretty_json(&files::file_exists(executor, &input.path).await)
            }
            "ssh_system_info" => {
                let _: EmptyInput = parse(name, args)?;
                system::system_info(executor).await
            }
            "ssh_disk_usage" => {
                let input: DiskUsageInput = parse(name, args)?;
                system::disk_usage(executor, input.path.as_deref()).await
            }
            "ssh_memory_usage" => {
                let _: EmptyInput = parse(name, args)?;
                system::memory_usage(executor).await
            }
            "ssh_process_list" => {
                let input: ProcessListInput = parse(name, args)?;
                system::process_list(executor, input.filter.as_deref(), input.top).await
            }
            "ssh_docker_ps" => {
                let input: DockerPsInput = parse(name, args)?;
                docker::docker_ps(executor, input.all).await
            }
            "ssh_docker_logs" => {
                let input: DockerLogsInput = parse(name, args)?;
                docker::docker_logs(executor, &input.container, input.lines).await
            }
            "ssh_service_status" => {
                let input: ServiceStatusInput = parse(name, args)?;
                services::service_status(executor, &input.service).await
            }
            _ => return Err(CatalogError::UnknownTool(name.to_string())),
        };

        Ok(output)
    }
}

fn parse<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, CatalogError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|source| CatalogError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}
