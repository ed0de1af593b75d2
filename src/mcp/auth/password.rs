//! Password-based SSH authentication.

use std::fmt;

use async_trait::async_trait;
use russh::client;

use crate::mcp::error::SshError;
use crate::mcp::session::SshClientHandler;

use super::traits::AuthStrategy;

/// Password authentication strategy.
pub struct PasswordAuth {
    password: String,
}

impl PasswordAuth {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl fmt::Debug for PasswordAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordAuth").finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthStrategy for PasswordAuth {
    async fn authenticate(
        &self,
        handle: &mut client::Handle<SshClientHandler>,
        username: &str,
    ) -> Result<bool, SshError> {
        let result = handle
            .authenticate_password(username, &self.password)
            .await
            .map_err(SshError::from)?;

        Ok(result.success())
    }

    fn name(&self) -> &'static str {
        "password"
    }
}
