//! System information operations.

use crate::mcp::config::DEFAULT_COMMAND_TIMEOUT_SECS;
use crate::mcp::executor::CommandExecutor;
use crate::mcp::format::format_result;

/// Default number of processes returned by `process_list`.
pub const DEFAULT_PROCESS_TOP: u32 = 20;

/// Hostname, OS release, uptime and load, each under a header.
pub const SYSTEM_INFO_COMMAND: &str = "echo '=== Hostname ===' && hostname && \
    echo '=== OS ===' && cat /etc/os-release 2>/dev/null | head -5 || uname -a && \
    echo '=== Uptime ===' && uptime && \
    echo '=== Load ===' && cat /proc/loadavg 2>/dev/null || uptime";

/// `free` on Linux, `vm_stat` on macOS.
pub const MEMORY_USAGE_COMMAND: &str = "free -h 2>/dev/null || vm_stat";

pub fn disk_usage_command(path: Option<&str>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("df -h {}", path),
        None => "df -h".to_string(),
    }
}

/// Build the process listing command.
///
/// With a filter the matching processes are grepped case-insensitively;
/// without one the top `top` processes by CPU are listed below the header.
pub fn process_list_command(filter: Option<&str>, top: u32) -> String {
    match filter.filter(|f| !f.is_empty()) {
        Some(filter) => format!(
            "ps aux | grep -i '{}' | grep -v grep | head -n {}",
            filter, top
        ),
        None => format!("ps aux --sort=-%cpu | head -n {}", top.saturating_add(1)),
    }
}

/// Hostname, OS, uptime and load.
pub async fn system_info(executor: &CommandExecutor) -> String {
    let result = executor
        .execute(SYSTEM_INFO_COMMAND, DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}

/// Disk usage for all filesystems, or the one holding `path`.
pub async fn disk_usage(executor: &CommandExecutor, path: Option<&str>) -> String {
    let result = executor
        .execute(&disk_usage_command(path), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}

pub async fn memory_usage(executor: &CommandExecutor) -> String {
    let result = executor
        .execute(MEMORY_USAGE_COMMAND, DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}

pub async fn process_list(executor: &CommandExecutor, filter: Option<&str>, top: u32) -> String {
    let result = executor
        .execute(&process_list_command(filter, top), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}
