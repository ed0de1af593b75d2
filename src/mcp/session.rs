//! russh client handler for NAS sessions.
//!
//! `SshClientHandler` accepts all host keys (similar to
//! `StrictHostKeyChecking=no` in OpenSSH). The NAS is assumed to sit on a
//! trusted network.

use russh::{client, keys};
use tracing::debug;

/// Client handler for russh that accepts all host keys.
pub struct SshClientHandler;

impl client::Handler for SshClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        debug!(
            "Accepting server host key ({:?})",
            server_public_key.algorithm()
        );
        Ok(true)
    }
}
