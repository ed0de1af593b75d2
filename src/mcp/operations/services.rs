//! Service status on the NAS.

use crate::mcp::config::DEFAULT_COMMAND_TIMEOUT_SECS;
use crate::mcp::executor::CommandExecutor;
use crate::mcp::format::format_result;

/// `systemctl status`, falling back to SysV `service` on hosts without systemd.
pub fn service_status_command(service: &str) -> String {
    format!(
        "systemctl status {} 2>/dev/null || service {} status",
        service, service
    )
}

pub async fn service_status(executor: &CommandExecutor, service: &str) -> String {
    let result = executor
        .execute(&service_status_command(service), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}
