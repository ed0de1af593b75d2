//! Scripted transport fakes shared by unit tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;

use super::config::NasConfig;
use super::connection::PROBE_COMMAND;
use super::error::{SshError, classify_error};
use super::transport::{Connector, RawOutput, RemoteSession};

pub(crate) type Responder = Arc<dyn Fn(&str) -> Result<RawOutput, SshError> + Send + Sync>;

/// Behaviour of a [`FakeConnector`] and the sessions it hands out.
#[derive(Clone, Default)]
pub(crate) struct FakeScript {
    /// Fail every connect with this message (classified like a russh error)
    pub connect_error: Option<String>,
    /// Fail every session close
    pub fail_close: bool,
    /// Reply for non-probe commands; defaults to exit 0 with no output
    pub responder: Option<Responder>,
    /// How long each non-probe command takes
    pub delay: Option<Duration>,
}

impl FakeScript {
    pub fn replying<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<RawOutput, SshError> + Send + Sync + 'static,
    {
        Self {
            responder: Some(Arc::new(f)),
            ..Default::default()
        }
    }

    /// Every command succeeds with `stdout`.
    pub fn stdout(stdout: &'static str) -> Self {
        Self::replying(move |_| Ok(output(0, stdout, "")))
    }
}

pub(crate) fn output(exit_code: i32, stdout: &str, stderr: &str) -> RawOutput {
    RawOutput {
        exit_code: Some(exit_code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

#[derive(Default)]
struct FakeState {
    connects: AtomicU32,
    closes: AtomicU32,
    generation: AtomicU32,
    commands: StdMutex<Vec<(String, Duration)>>,
    events: StdMutex<Vec<String>>,
}

pub(crate) struct FakeConnector {
    script: FakeScript,
    state: Arc<FakeState>,
}

impl FakeConnector {
    pub fn new(script: FakeScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            state: Arc::new(FakeState::default()),
        })
    }

    pub fn connects(&self) -> u32 {
        self.state.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u32 {
        self.state.closes.load(Ordering::SeqCst)
    }

    /// Every command seen by any session, probes included.
    pub fn commands(&self) -> Vec<String> {
        self.state
            .commands
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Commands issued by callers, probes excluded.
    pub fn issued(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| c != PROBE_COMMAND)
            .collect()
    }

    /// Timeouts of the commands issued by callers, probes excluded.
    pub fn issued_timeouts(&self) -> Vec<Duration> {
        self.state
            .commands
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c != PROBE_COMMAND)
            .map(|(_, t)| *t)
            .collect()
    }

    /// `start <cmd>` / `end <cmd>` markers around every non-probe command,
    /// in the order sessions observed them.
    pub fn events(&self) -> Vec<String> {
        self.state.events.lock().unwrap().clone()
    }

    /// Make every session handed out so far fail all further commands.
    pub fn kill_sessions(&self) {
        self.state.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(
        &self,
        _config: &NasConfig,
        _timeout: Duration,
    ) -> Result<Box<dyn RemoteSession>, SshError> {
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.script.connect_error {
            return Err(classify_error(msg));
        }
        Ok(Box::new(FakeSession {
            script: self.script.clone(),
            state: self.state.clone(),
            generation: self.state.generation.load(Ordering::SeqCst),
        }))
    }
}

struct FakeSession {
    script: FakeScript,
    state: Arc<FakeState>,
    generation: u32,
}

#[async_trait]
impl RemoteSession for FakeSession {
    async fn exec(&self, command: &str, timeout: Duration) -> Result<RawOutput, SshError> {
        self.state
            .commands
            .lock()
            .unwrap()
            .push((command.to_string(), timeout));

        if self.generation != self.state.generation.load(Ordering::SeqCst) {
            return Err(SshError::Transport("Disconnected".into()));
        }
        if command == PROBE_COMMAND {
            return Ok(output(0, "\n", ""));
        }

        self.state.events.lock().unwrap().push(format!("start {}", command));
        if let Some(delay) = self.script.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = match &self.script.responder {
            Some(respond) => respond(command),
            None => Ok(output(0, "", "")),
        };
        self.state.events.lock().unwrap().push(format!("end {}", command));
        reply
    }

    async fn close(&self) -> Result<(), SshError> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        if self.script.fail_close {
            return Err(SshError::Transport("close failed".into()));
        }
        Ok(())
    }
}
