//! Authentication strategy trait definition.

use async_trait::async_trait;
use russh::client;

use crate::mcp::error::SshError;
use crate::mcp::session::SshClientHandler;

/// Trait for SSH authentication strategies.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Attempt to authenticate with the SSH server.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Authentication succeeded
    /// * `Ok(false)` - The server rejected the credentials
    /// * `Err(SshError)` - Transport failure during the attempt
    async fn authenticate(
        &self,
        handle: &mut client::Handle<SshClientHandler>,
        username: &str,
    ) -> Result<bool, SshError>;

    /// Name of the strategy, used in log lines.
    fn name(&self) -> &'static str;
}
