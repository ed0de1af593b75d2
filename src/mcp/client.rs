//! russh-backed transport for NAS sessions.
//!
//! ## Connection Lifecycle
//!
//! 1. **Client Configuration**: keepalive and compression settings. No
//!    inactivity timeout is set: the session is cached between tool calls
//!    and its health is checked by the connection manager's probe instead.
//!
//! 2. **Connection Establishment**: TCP + SSH handshake bounded by the
//!    connect timeout.
//!
//! 3. **Authentication**: password authentication via [`PasswordAuth`].
//!
//! 4. **Command Execution**: one session channel per command; stdout,
//!    stderr and the exit status are drained until the channel closes.
//!
//! No retry loop lives here. A failed connect is reported once and the next
//! tool call starts over.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::{ChannelMsg, Disconnect, client};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::mcp::auth::{AuthStrategy, PasswordAuth};
use crate::mcp::config::{NasConfig, resolve_compression};
use crate::mcp::error::{SshError, classify_error};
use crate::mcp::session::SshClientHandler;
use crate::mcp::transport::{Connector, RawOutput, RemoteSession};

/// Build russh client configuration.
///
/// Keepalives are sent every 30 seconds and the connection is dropped after
/// 3 unanswered ones, which lets the liveness probe notice dead sessions.
pub(crate) fn build_client_config(compress: bool) -> Arc<client::Config> {
    let compression = if compress {
        (&[russh::compression::ZLIB, russh::compression::NONE][..]).into()
    } else {
        (&[russh::compression::NONE][..]).into()
    };

    let preferred = russh::Preferred {
        compression,
        ..Default::default()
    };

    Arc::new(client::Config {
        inactivity_timeout: None,
        keepalive_interval: Some(Duration::from_secs(30)),
        keepalive_max: 3,
        preferred,
        ..Default::default()
    })
}

/// Connector that opens real SSH connections with russh.
#[derive(Debug, Clone)]
pub struct RusshConnector {
    compress: bool,
}

impl RusshConnector {
    /// Create a connector, resolving compression from `NAS_COMPRESSION`.
    pub fn new() -> Self {
        Self {
            compress: resolve_compression(None),
        }
    }

    pub fn with_compression(compress: bool) -> Self {
        Self { compress }
    }
}

impl Default for RusshConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for RusshConnector {
    async fn connect(
        &self,
        config: &NasConfig,
        timeout: Duration,
    ) -> Result<Box<dyn RemoteSession>, SshError> {
        let address = config.address();
        debug!(
            "Connecting to {}@{} (timeout {}s, compress={})",
            config.user,
            address,
            timeout.as_secs(),
            self.compress
        );

        let client_config = build_client_config(self.compress);
        let connect_future = client::connect(
            client_config,
            (config.host.as_str(), config.port),
            SshClientHandler,
        );

        let mut handle = tokio::time::timeout(timeout, connect_future)
            .await
            .map_err(|_| {
                SshError::Other(format!(
                    "Connection to {} timed out after {} seconds",
                    address,
                    timeout.as_secs()
                ))
            })?
            .map_err(SshError::from)?;

        let auth = PasswordAuth::new(config.password.as_str());
        if !auth.authenticate(&mut handle, &config.user).await? {
            return Err(SshError::Authentication(format!(
                "{} authentication rejected for {}",
                auth.name(),
                config.user
            )));
        }

        info!("Connected to {}@{}", config.user, address);
        Ok(Box::new(RusshSession { handle }))
    }
}

/// An authenticated russh session.
pub struct RusshSession {
    handle: client::Handle<SshClientHandler>,
}

#[async_trait]
impl RemoteSession for RusshSession {
    async fn exec(&self, command: &str, timeout: Duration) -> Result<RawOutput, SshError> {
        // One deadline covers channel open, exec and output collection
        let deadline = Instant::now() + timeout;

        let mut channel = before_deadline(deadline, timeout, async {
            self.handle
                .channel_open_session()
                .await
                .map_err(|e| classify_error(&format!("Failed to open channel: {}", e)))
        })
        .await?;

        let mut output = RawOutput {
            exit_code: None,
            stdout: Vec::with_capacity(4096),
            stderr: Vec::with_capacity(1024),
        };

        let outcome = before_deadline(deadline, timeout, async {
            channel
                .exec(true, command)
                .await
                .map_err(|e| classify_error(&format!("Failed to execute command: {}", e)))?;
            drain_channel(&mut channel, &mut output).await;
            Ok(())
        })
        .await;

        // Close the channel on every path so the session stays usable
        let _ = channel.close().await;

        if let Err(SshError::Timeout(_)) = &outcome {
            warn!(
                "Command timed out after {:?} ({} bytes stdout, {} bytes stderr collected)",
                timeout,
                output.stdout.len(),
                output.stderr.len()
            );
        }
        outcome.map(|()| output)
    }

    async fn close(&self) -> Result<(), SshError> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
            .map_err(SshError::from)
    }
}

/// Run `stage` unless `deadline` passes first, reporting the full `timeout`.
async fn before_deadline<T>(
    deadline: Instant,
    timeout: Duration,
    stage: impl Future<Output = Result<T, SshError>>,
) -> Result<T, SshError> {
    tokio::time::timeout_at(deadline, stage)
        .await
        .map_err(|_| SshError::Timeout(timeout))?
}

/// Read channel messages until the channel closes.
async fn drain_channel(channel: &mut russh::Channel<client::Msg>, output: &mut RawOutput) {
    loop {
        match channel.wait().await {
            Some(ChannelMsg::Data { data }) => {
                output.stdout.extend_from_slice(&data);
            }
            Some(ChannelMsg::ExtendedData { data, ext }) => {
                // ext == 1 is stderr in SSH protocol
                if ext == 1 {
                    output.stderr.extend_from_slice(&data);
                }
            }
            Some(ChannelMsg::ExitStatus { exit_status }) => {
                output.exit_code = Some(exit_status as i32);
            }
            Some(ChannelMsg::Eof) => {
                // Keep waiting for the exit status if it has not arrived yet
                if output.exit_code.is_some() {
                    break;
                }
            }
            Some(ChannelMsg::Close) | None => break,
            Some(_) => {}
        }
    }
}
