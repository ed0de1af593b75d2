//! Command execution against the NAS.
//!
//! [`CommandExecutor::execute`] is a pure transport layer: it does not
//! inspect or sanitize the command it is handed. Every outcome, including
//! missing credentials and transport failures, comes back as an
//! [`ExecutionResult`]; nothing is propagated as an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::client::RusshConnector;
use super::config::NasConfig;
use super::connection::ConnectionManager;
use super::error::SshError;
use super::transport::{Connector, RawOutput};
use super::types::ExecutionResult;

pub struct CommandExecutor {
    config: Arc<NasConfig>,
    manager: ConnectionManager,
}

impl CommandExecutor {
    pub fn new(config: Arc<NasConfig>, manager: ConnectionManager) -> Self {
        Self { config, manager }
    }

    /// Executor backed by a real russh connection.
    pub fn from_config(config: NasConfig) -> Self {
        Self::with_connector(config, Arc::new(RusshConnector::new()))
    }

    pub fn with_connector(config: NasConfig, connector: Arc<dyn Connector>) -> Self {
        let config = Arc::new(config);
        let manager = ConnectionManager::new(config.clone(), connector);
        Self::new(config, manager)
    }

    pub fn config(&self) -> &NasConfig {
        &self.config
    }

    /// Whether host, user and password are all set.
    pub fn configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Run `command` on the NAS with a timeout in seconds.
    pub async fn execute(&self, command: &str, timeout_secs: u64) -> ExecutionResult {
        if !self.configured() {
            return SshError::NotConfigured.into_result();
        }

        match self.run(command, Duration::from_secs(timeout_secs)).await {
            Ok(raw) => decode(raw),
            Err(e) => {
                warn!("Command on {} failed: {}", self.config.address(), e);
                e.into_result()
            }
        }
    }

    async fn run(&self, command: &str, timeout: Duration) -> Result<RawOutput, SshError> {
        debug!("Executing with timeout {}s: {}", timeout.as_secs(), command);
        self.manager.exec(command, timeout).await
    }

    /// Close the cached session.
    pub async fn close(&self) {
        self.manager.close().await;
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.manager
    }
}

/// Decode both streams as UTF-8, replacing invalid sequences.
///
/// A missing exit status is reported as -1.
fn decode(raw: RawOutput) -> ExecutionResult {
    ExecutionResult::completed(
        raw.exit_code.unwrap_or(-1),
        String::from_utf8_lossy(&raw.stdout),
        String::from_utf8_lossy(&raw.stderr),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::error::AUTH_FAILED_MESSAGE;
    use crate::mcp::testing::{FakeConnector, FakeScript, output};

    fn executor(connector: &Arc<FakeConnector>) -> CommandExecutor {
        CommandExecutor::with_connector(
            NasConfig::new("10.0.0.1", 22, "testuser", "testpass"),
            connector.clone(),
        )
    }

    mod not_configured {
        use super::*;

        #[tokio::test]
        async fn test_returns_error_without_connecting() {
            let connector = FakeConnector::new(FakeScript::default());
            let executor = CommandExecutor::with_connector(NasConfig::default(), connector.clone());

            let result = executor.execute("ls", 30).await;

            assert!(!result.success);
            assert!(result.error.as_deref().unwrap().contains("not configured"));
            assert!(result.exit_code.is_none());
            assert_eq!(connector.connects(), 0);
            assert!(!executor.connection().is_connected().await);
        }

        #[tokio::test]
        async fn test_partial_credentials_are_not_configured() {
            let connector = FakeConnector::new(FakeScript::default());
            let executor = CommandExecutor::with_connector(
                NasConfig::new("10.0.0.1", 22, "admin", ""),
                connector.clone(),
            );

            assert!(!executor.configured());
            assert!(!executor.execute("uptime", 30).await.success);
            assert_eq!(connector.connects(), 0);
        }
    }

    mod completed {
        use super::*;

        #[tokio::test]
        async fn test_success() {
            let connector = FakeConnector::new(FakeScript::stdout("output line\n"));
            let executor = executor(&connector);

            let result = executor.execute("echo hello", 30).await;

            assert_eq!(result, ExecutionResult::completed(0, "output line\n", ""));
            assert_eq!(connector.issued(), vec!["echo hello"]);
            assert_eq!(connector.issued_timeouts(), vec![Duration::from_secs(30)]);
        }

        #[tokio::test]
        async fn test_nonzero_exit_is_not_success() {
            let connector = FakeConnector::new(FakeScript::replying(|_| {
                Ok(output(2, "", "ls: cannot access '/nope'"))
            }));
            let result = executor(&connector).execute("ls /nope", 30).await;

            assert!(!result.success);
            assert_eq!(result.exit_code, Some(2));
            assert_eq!(result.stderr(), "ls: cannot access '/nope'");
            assert!(result.error.is_none());
        }

        #[tokio::test]
        async fn test_invalid_utf8_is_replaced() {
            let connector = FakeConnector::new(FakeScript::replying(|_| {
                Ok(RawOutput {
                    exit_code: Some(0),
                    stdout: vec![b'o', b'k', 0xff, 0xfe],
                    stderr: vec![0xc3],
                })
            }));
            let result = executor(&connector).execute("cat blob", 30).await;

            assert!(result.success);
            assert_eq!(result.stdout(), "ok\u{fffd}\u{fffd}");
            assert_eq!(result.stderr(), "\u{fffd}");
        }

        #[tokio::test]
        async fn test_missing_exit_status_is_minus_one() {
            let connector = FakeConnector::new(FakeScript::replying(|_| {
                Ok(RawOutput {
                    exit_code: None,
                    stdout: b"partial".to_vec(),
                    stderr: Vec::new(),
                })
            }));
            let result = executor(&connector).execute("sleep 1", 30).await;

            assert!(!result.success);
            assert_eq!(result.exit_code, Some(-1));
        }
    }

    mod failures {
        use super::*;

        #[tokio::test]
        async fn test_authentication_failure() {
            let connector = FakeConnector::new(FakeScript {
                connect_error: Some("Authentication failed".into()),
                ..Default::default()
            });
            let result = executor(&connector).execute("ls", 30).await;

            assert!(!result.success);
            assert_eq!(result.error.as_deref(), Some(AUTH_FAILED_MESSAGE));
            assert!(result.stdout.is_none());
        }

        #[tokio::test]
        async fn test_transport_failure() {
            let connector = FakeConnector::new(FakeScript {
                connect_error: Some("Connection refused".into()),
                ..Default::default()
            });
            let result = executor(&connector).execute("ls", 30).await;

            assert_eq!(result.error.as_deref(), Some("SSH error: Connection refused"));
            assert!(result.exit_code.is_none());
        }

        #[tokio::test]
        async fn test_unknown_failure() {
            let connector = FakeConnector::new(FakeScript {
                connect_error: Some("name resolution went sideways".into()),
                ..Default::default()
            });
            let result = executor(&connector).execute("ls", 30).await;

            assert_eq!(
                result.error.as_deref(),
                Some("Connection error: name resolution went sideways")
            );
        }

        #[tokio::test]
        async fn test_timeout_is_connection_error() {
            let connector = FakeConnector::new(FakeScript::replying(|_| {
                Err(SshError::Timeout(Duration::from_secs(5)))
            }));
            let result = executor(&connector).execute("sleep 60", 5).await;

            assert!(!result.success);
            assert!(result.error.as_deref().unwrap().starts_with("Connection error:"));
        }

        #[tokio::test]
        async fn test_persistent_connect_failure_is_reported_each_call() {
            let connector = FakeConnector::new(FakeScript {
                connect_error: Some("Connection refused".into()),
                ..Default::default()
            });
            let executor = executor(&connector);

            for _ in 0..3 {
                let result = executor.execute("ls", 30).await;
                assert!(result.error.is_some());
            }
            // One attempt per call, no retry loop
            assert_eq!(connector.connects(), 3);
        }
    }

    mod reconnect {
        use super::*;

        #[tokio::test]
        async fn test_dead_session_is_replaced_before_next_command() {
            let connector = FakeConnector::new(FakeScript::stdout("fine\n"));
            let executor = executor(&connector);

            assert!(executor.execute("uptime", 30).await.success);
            connector.kill_sessions();
            let result = executor.execute("uptime", 30).await;

            assert!(result.success);
            assert_eq!(connector.connects(), 2);
            assert_eq!(connector.issued(), vec!["uptime", "uptime"]);
        }

        #[tokio::test]
        async fn test_close_then_execute_reconnects() {
            let connector = FakeConnector::new(FakeScript::default());
            let executor = executor(&connector);

            executor.execute("true", 30).await;
            executor.close().await;
            executor.execute("true", 30).await;

            assert_eq!(connector.connects(), 2);
            assert_eq!(connector.closes(), 1);
        }
    }

    mod concurrency {
        use super::*;

        #[tokio::test]
        async fn test_spawned_executions_share_one_serialized_session() {
            let connector = FakeConnector::new(FakeScript {
                delay: Some(Duration::from_millis(5)),
                ..Default::default()
            });
            let executor = Arc::new(executor(&connector));

            let tasks: Vec<_> = (0..6)
                .map(|i| {
                    let executor = executor.clone();
                    tokio::spawn(async move { executor.execute(&format!("task{}", i), 30).await })
                })
                .collect();
            for task in tasks {
                assert!(task.await.unwrap().success);
            }

            assert_eq!(connector.connects(), 1);
            let events = connector.events();
            assert_eq!(events.len(), 12);
            for pair in events.chunks(2) {
                assert!(pair[0].starts_with("start "));
                assert_eq!(pair[1], pair[0].replacen("start", "end", 1));
            }
        }
    }
}
