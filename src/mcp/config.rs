//! Configuration for the NAS connection.
//!
//! Connection credentials are read once from the environment (or a `.env`
//! file loaded by the binaries) and never mutated afterwards. Every value is
//! trimmed so that trailing newlines left behind by secret-injection tooling
//! do not end up in the SSH handshake.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NAS_HOST` | "" | NAS hostname or IP address |
//! | `NAS_PORT` | 22 | SSH port |
//! | `NAS_USER` | "" | SSH username |
//! | `NAS_PASSWORD` | "" | SSH password |
//! | `NAS_COMMAND_TIMEOUT` | 30s | Command timeout when a caller passes none |
//! | `NAS_COMPRESSION` | true | Prefer zlib compression on the transport |

use std::env;
use std::fmt;
use std::time::Duration;

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

/// Timeout for establishing a new SSH connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the liveness probe run against a cached session
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default command execution timeout in seconds
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Timeout used by the status check
pub const STATUS_TIMEOUT_SECS: u64 = 10;

/// Timeout used when fetching container logs
pub const DOCKER_LOGS_TIMEOUT_SECS: u64 = 60;

pub(crate) const HOST_ENV_VAR: &str = "NAS_HOST";
pub(crate) const PORT_ENV_VAR: &str = "NAS_PORT";
pub(crate) const USER_ENV_VAR: &str = "NAS_USER";
pub(crate) const PASSWORD_ENV_VAR: &str = "NAS_PASSWORD";

/// Environment variable name for the default command timeout
pub(crate) const COMMAND_TIMEOUT_ENV_VAR: &str = "NAS_COMMAND_TIMEOUT";

/// Environment variable name for SSH compression
pub(crate) const COMPRESSION_ENV_VAR: &str = "NAS_COMPRESSION";

/// Connection settings for the managed NAS.
#[derive(Clone, PartialEq, Eq)]
pub struct NasConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl Default for NasConfig {
    /// Unconfigured credentials on the standard SSH port.
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            user: String::new(),
            password: String::new(),
        }
    }
}

impl NasConfig {
    /// Build a configuration from explicit values, trimming surrounding whitespace.
    pub fn new(
        host: impl AsRef<str>,
        port: u16,
        user: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> Self {
        Self {
            host: host.as_ref().trim().to_string(),
            port,
            user: user.as_ref().trim().to_string(),
            password: password.as_ref().trim().to_string(),
        }
    }

    /// Read the configuration from `NAS_*` environment variables.
    ///
    /// Missing variables fall back to empty strings (and port 22), which
    /// leaves the configuration unconfigured rather than failing.
    pub fn from_env() -> Self {
        let port = env::var(PORT_ENV_VAR)
            .ok()
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self::new(
            env::var(HOST_ENV_VAR).unwrap_or_default(),
            port,
            env::var(USER_ENV_VAR).unwrap_or_default(),
            env::var(PASSWORD_ENV_VAR).unwrap_or_default(),
        )
    }

    /// Whether host, user and password are all set.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.user.is_empty() && !self.password.is_empty()
    }

    /// `host:port` form used in status reports and log lines.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for NasConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NasConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resolve the command timeout with priority: parameter -> env var -> default
pub fn resolve_command_timeout(timeout_param: Option<u64>) -> u64 {
    // Priority 1: Use parameter if provided
    if let Some(timeout) = timeout_param {
        return timeout;
    }

    // Priority 2: Use environment variable if set
    if let Ok(env_timeout) = env::var(COMMAND_TIMEOUT_ENV_VAR)
        && let Ok(timeout) = env_timeout.trim().parse::<u64>()
    {
        return timeout;
    }

    // Priority 3: Default value
    DEFAULT_COMMAND_TIMEOUT_SECS
}

/// Resolve the compression setting with priority: parameter -> env var -> default (true)
pub(crate) fn resolve_compression(compress_param: Option<bool>) -> bool {
    if let Some(compress) = compress_param {
        return compress;
    }

    if let Ok(env_compress) = env::var(COMPRESSION_ENV_VAR) {
        let value = env_compress.trim();
        return value.eq_ignore_ascii_case("true") || value == "1";
    }

    true
}
