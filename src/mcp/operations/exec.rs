//! Raw command execution and connection status.

use tracing::debug;

use crate::mcp::config::STATUS_TIMEOUT_SECS;
use crate::mcp::executor::CommandExecutor;
use crate::mcp::format::format_result;
use crate::mcp::types::StatusResponse;

/// Response for an empty command string.
pub const NO_COMMAND_MESSAGE: &str = "Error: No command provided";

/// Command used to identify the NAS in status checks.
pub const STATUS_COMMAND: &str = "hostname && uname -a";

const STATUS_NOT_CONFIGURED: &str = "NAS not configured. Set NAS_HOST, NAS_USER, NAS_PASSWORD";

/// Execute an arbitrary command and format its output.
///
/// An empty command is rejected without touching the executor.
pub async fn execute(executor: &CommandExecutor, command: &str, timeout_secs: u64) -> String {
    if command.is_empty() {
        return NO_COMMAND_MESSAGE.to_string();
    }

    let result = executor.execute(command, timeout_secs).await;
    format_result(&result)
}

/// Check connectivity by running [`STATUS_COMMAND`] on the NAS.
pub async fn check_status(executor: &CommandExecutor) -> StatusResponse {
    if !executor.configured() {
        return StatusResponse {
            status: "error".to_string(),
            host: None,
            user: None,
            system: None,
            error: Some(STATUS_NOT_CONFIGURED.to_string()),
        };
    }

    let config = executor.config();
    let result = executor.execute(STATUS_COMMAND, STATUS_TIMEOUT_SECS).await;
    debug!("Status check on {} success={}", config.address(), result.success);

    if result.success {
        StatusResponse {
            status: "connected".to_string(),
            host: Some(config.address()),
            user: Some(config.user.clone()),
            system: Some(result.stdout().trim().to_string()),
            error: None,
        }
    } else {
        StatusResponse {
            status: "error".to_string(),
            host: Some(config.address()),
            user: None,
            system: None,
            error: Some(
                result
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::mcp::config::NasConfig;
    use crate::mcp::testing::{FakeConnector, FakeScript, output};

    fn executor(connector: &Arc<FakeConnector>) -> CommandExecutor {
        CommandExecutor::with_connector(
            NasConfig::new("10.0.0.1", 22, "testuser", "testpass"),
            connector.clone(),
        )
    }

    mod execute {
        use super::*;

        #[tokio::test]
        async fn test_formats_output() {
            let connector = FakeConnector::new(FakeScript::stdout("output line\n"));
            let text = execute(&executor(&connector), "echo hello", 30).await;
            assert_eq!(text, "output line");
        }

        #[tokio::test]
        async fn test_empty_command_skips_executor() {
            let connector = FakeConnector::new(FakeScript::default());
            let text = execute(&executor(&connector), "", 30).await;

            assert_eq!(text, NO_COMMAND_MESSAGE);
            assert_eq!(connector.connects(), 0);
            assert!(connector.commands().is_empty());
        }

        #[tokio::test]
        async fn test_passes_timeout_through() {
            let connector = FakeConnector::new(FakeScript::default());
            execute(&executor(&connector), "sleep 100", 120).await;
            assert_eq!(connector.issued_timeouts(), vec![Duration::from_secs(120)]);
        }

        #[tokio::test]
        async fn test_failure_is_text() {
            let connector = FakeConnector::new(FakeScript {
                connect_error: Some("Connection refused".into()),
                ..Default::default()
            });
            let text = execute(&executor(&connector), "ls", 30).await;
            assert_eq!(text, "Error: SSH error: Connection refused");
        }
    }

    mod check_status {
        use super::*;

        #[tokio::test]
        async fn test_connected() {
            let connector =
                FakeConnector::new(FakeScript::stdout("mynas\nLinux mynas 5.15\n"));
            let status = check_status(&executor(&connector)).await;

            assert_eq!(status.status, "connected");
            assert_eq!(status.host.as_deref(), Some("10.0.0.1:22"));
            assert_eq!(status.user.as_deref(), Some("testuser"));
            assert_eq!(status.system.as_deref(), Some("mynas\nLinux mynas 5.15"));
            assert_eq!(connector.issued(), vec![STATUS_COMMAND]);
            assert_eq!(
                connector.issued_timeouts(),
                vec![Duration::from_secs(STATUS_TIMEOUT_SECS)]
            );
        }

        #[tokio::test]
        async fn test_not_configured() {
            let connector = FakeConnector::new(FakeScript::default());
            let executor =
                CommandExecutor::with_connector(NasConfig::default(), connector.clone());
            let status = check_status(&executor).await;

            assert_eq!(status.status, "error");
            assert!(status.host.is_none());
            assert!(status.error.unwrap().contains("not configured"));
            assert_eq!(connector.connects(), 0);
        }

        #[tokio::test]
        async fn test_connection_error() {
            let connector = FakeConnector::new(FakeScript {
                connect_error: Some("Authentication failed".into()),
                ..Default::default()
            });
            let status = check_status(&executor(&connector)).await;

            assert_eq!(status.status, "error");
            assert_eq!(status.host.as_deref(), Some("10.0.0.1:22"));
            assert!(status.error.unwrap().starts_with("Authentication failed"));
        }

        #[tokio::test]
        async fn test_nonzero_exit_reports_unknown_error() {
            let connector =
                FakeConnector::new(FakeScript::replying(|_| Ok(output(127, "", "not found"))));
            let status = check_status(&executor(&connector)).await;

            assert_eq!(status.status, "error");
            assert_eq!(status.error.as_deref(), Some("Unknown error"));
        }
    }
}
