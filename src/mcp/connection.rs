//! Connection manager owning the single cached NAS session.
//!
//! # Lifecycle
//!
//! - The session is created lazily on the first [`ConnectionManager::exec`].
//! - Before a cached session is reused it is probed with `echo` (5 second
//!   timeout). Any probe failure closes the stale session, swallowing close
//!   errors, and a fresh one is connected (30 second timeout).
//! - [`ConnectionManager::close`] drops the session; it is idempotent.
//!
//! # Concurrency
//!
//! The optional session lives behind a `tokio::sync::Mutex`. [`ConnectionManager::exec`]
//! holds the lock across probe, reconnect and the command itself, so
//! concurrent tool calls are serialized: a probe-then-replace can never race
//! with a command running on the session being replaced.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::config::{CONNECT_TIMEOUT, NasConfig, PROBE_TIMEOUT};
use super::error::SshError;
use super::transport::{Connector, RawOutput, RemoteSession};

/// Command used to check that a cached session still works.
pub(crate) const PROBE_COMMAND: &str = "echo";

type SessionSlot = Option<Arc<dyn RemoteSession>>;

pub struct ConnectionManager {
    config: Arc<NasConfig>,
    connector: Arc<dyn Connector>,
    session: Mutex<SessionSlot>,
    connects: AtomicU32,
}

impl ConnectionManager {
    pub fn new(config: Arc<NasConfig>, connector: Arc<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            session: Mutex::new(None),
            connects: AtomicU32::new(0),
        }
    }

    /// Run `command` on a live session, reconnecting if the cached one is
    /// missing or dead.
    ///
    /// At most one connection attempt is made per call. The session lock is
    /// held until the command finishes.
    pub async fn exec(&self, command: &str, timeout: Duration) -> Result<RawOutput, SshError> {
        let mut slot = self.session.lock().await;
        let session = self.live_session(&mut slot).await?;
        session.exec(command, timeout).await
    }

    /// Probe the cached session, replacing it when the probe fails.
    async fn live_session(
        &self,
        slot: &mut SessionSlot,
    ) -> Result<Arc<dyn RemoteSession>, SshError> {
        if let Some(session) = slot.as_ref().cloned() {
            match session.exec(PROBE_COMMAND, PROBE_TIMEOUT).await {
                Ok(_) => {
                    debug!("Reusing cached session to {}", self.config.address());
                    return Ok(session);
                }
                Err(e) => {
                    warn!(
                        "Cached session to {} failed liveness probe: {}",
                        self.config.address(),
                        e
                    );
                    *slot = None;
                    if let Err(e) = session.close().await {
                        debug!("Ignoring error while closing stale session: {}", e);
                    }
                }
            }
        }

        self.connects.fetch_add(1, Ordering::SeqCst);
        info!(
            "Opening SSH session to {}@{}",
            self.config.user,
            self.config.address()
        );
        let session: Arc<dyn RemoteSession> =
            Arc::from(self.connector.connect(&self.config, CONNECT_TIMEOUT).await?);
        *slot = Some(session.clone());
        Ok(session)
    }

    /// Close the cached session, if any. Errors during close are ignored.
    pub async fn close(&self) {
        let mut slot = self.session.lock().await;
        if let Some(session) = slot.take() {
            info!("Closing SSH session to {}", self.config.address());
            if let Err(e) = session.close().await {
                debug!("Ignoring error while closing session: {}", e);
            }
        }
    }

    /// Whether a session is currently cached.
    pub async fn is_connected(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Number of connection attempts made so far.
    pub fn connect_attempts(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &NasConfig {
        &self.config
    }
}
