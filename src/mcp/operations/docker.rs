//! Docker operations on the NAS.

use crate::mcp::config::{DEFAULT_COMMAND_TIMEOUT_SECS, DOCKER_LOGS_TIMEOUT_SECS};
use crate::mcp::executor::CommandExecutor;
use crate::mcp::format::format_result;

/// Default number of log lines fetched by `docker_logs`.
pub const DEFAULT_LOG_LINES: u32 = 100;

pub fn docker_ps_command(all: bool) -> &'static str {
    if all { "docker ps -a" } else { "docker ps" }
}

pub fn docker_logs_command(container: &str, lines: u32) -> String {
    format!("docker logs --tail {} {}", lines, container)
}

/// List running containers, or all of them when `all` is set.
pub async fn docker_ps(executor: &CommandExecutor, all: bool) -> String {
    let result = executor
        .execute(docker_ps_command(all), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}

/// Last `lines` log lines of `container`. Uses a longer timeout since log
/// retrieval on a busy container can be slow.
pub async fn docker_logs(executor: &CommandExecutor, container: &str, lines: u32) -> String {
    let result = executor
        .execute(
            &docker_logs_command(container, lines),
            DOCKER_LOGS_TIMEOUT_SECS,
        )
        .await;
    format_result(&result)
}
