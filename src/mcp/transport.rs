//! Transport abstractions for remote-shell sessions.
//!
//! The connection manager only talks to these traits, so the russh-backed
//! implementation in [`crate::mcp::client`] can be swapped for scripted fakes
//! in tests.

use std::time::Duration;

use async_trait::async_trait;

use super::config::NasConfig;
use super::error::SshError;

/// Raw output of one remote command, before UTF-8 decoding.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawOutput {
    /// Exit status reported by the server, if any was sent
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// An open, authenticated remote-shell session.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Run `command` and drain both output streams.
    ///
    /// Fails with [`SshError::Timeout`] when the command does not finish
    /// within `timeout`.
    async fn exec(&self, command: &str, timeout: Duration) -> Result<RawOutput, SshError>;

    /// Close the session.
    async fn close(&self) -> Result<(), SshError>;
}

/// Factory for new [`RemoteSession`]s.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connect and authenticate against the configured host.
    async fn connect(
        &self,
        config: &NasConfig,
        timeout: Duration,
    ) -> Result<Box<dyn RemoteSession>, SshError>;
}
