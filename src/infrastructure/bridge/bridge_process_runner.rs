use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::application::ports::{LaunchError, ProcessRunner};
use crate::domain::ProcessOutcome;

pub const DEFAULT_BRIDGE_PROGRAM: &str = "wsl";
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// How long the output readers may keep draining once the process is gone.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Runs commands as `<program> -e <shell> -c <command>`, the way `wsl.exe` hands a command
/// line to a shell inside the subsystem.
#[derive(Debug, Clone)]
pub struct BridgeProcessRunner {
    program: String,
    shell: String,
}

impl BridgeProcessRunner {
    pub fn new(program: impl Into<String>, shell: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            shell: shell.into(),
        }
    }

    fn command(&self, command: &str) -> Command {
        let mut std_cmd = std::process::Command::new(&self.program);
        std_cmd
            .arg("-e")
            .arg(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut std_cmd, 0);

        let mut cmd = Command::from(std_cmd);
        cmd.kill_on_drop(true);
        cmd
    }
}

impl Default for BridgeProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_BRIDGE_PROGRAM, DEFAULT_SHELL)
    }
}

#[async_trait]
impl ProcessRunner for BridgeProcessRunner {
    async fn run(&self, command: &str, timeout: Duration) -> Result<ProcessOutcome, LaunchError> {
        let child = self
            .command(command)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!(
            program = %self.program,
            pid = child.id(),
            timeout_secs = timeout.as_secs(),
            "Bridge process started"
        );

        // Supervision lives on its own task so the request task only awaits the handle.
        tokio::spawn(supervise(child, timeout))
            .await
            .map_err(|e| LaunchError::Supervisor(e.to_string()))
    }
}

async fn supervise(mut child: Child, timeout: Duration) -> ProcessOutcome {
    let stdout = OutputBuffer::default();
    let stderr = OutputBuffer::default();
    let stdout_reader = child
        .stdout
        .take()
        .map(|pipe| tokio::spawn(collect_lines(pipe, stdout.clone(), "stdout")));
    let stderr_reader = child
        .stderr
        .take()
        .map(|pipe| tokio::spawn(collect_lines(pipe, stderr.clone(), "stderr")));

    // `None` means the deadline passed; `Some(code)` means the process ended on its own.
    let exited = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => Some(status.code()),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Failed to wait for bridge process");
            Some(None)
        }
        Err(_) => {
            tracing::warn!(
                pid = child.id(),
                timeout_secs = timeout.as_secs(),
                "Bridge process timed out, terminating"
            );
            terminate(&mut child).await;
            None
        }
    };

    tokio::join!(drain(stdout_reader), drain(stderr_reader));

    match exited {
        Some(code) => {
            tracing::debug!(exit_code = ?code, "Bridge process exited");
            ProcessOutcome::exited(code, stdout.snapshot(), stderr.snapshot())
        }
        None => ProcessOutcome::timed_out(stdout.snapshot(), stderr.snapshot()),
    }
}

async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        kill_process_group(pid);
    }
    if let Err(e) = child.start_kill() {
        tracing::debug!(error = %e, "Bridge process already gone");
    }
    if let Err(e) = child.wait().await {
        tracing::warn!(error = %e, "Failed to reap terminated bridge process");
    }
}

/// The shell may have forked the converter; signal the whole group so nothing keeps running.
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        tracing::warn!(pid = pid, "Bridge process id out of range for a process group");
        return;
    };
    if let Err(errno) = killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        tracing::debug!(error = %errno, pid = pid, "Could not signal bridge process group");
    }
}

async fn drain(reader: Option<JoinHandle<()>>) {
    let Some(mut reader) = reader else {
        return;
    };
    if tokio::time::timeout(DRAIN_GRACE, &mut reader).await.is_err() {
        tracing::debug!("Output reader still blocked after exit, abandoning it");
        reader.abort();
    }
}

async fn collect_lines<P>(pipe: P, buffer: OutputBuffer, stream: &'static str)
where
    P: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(pipe).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                tracing::debug!(stream = stream, line = %line, "Bridge output");
                buffer.push_line(&line);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(stream = stream, error = %e, "Failed to read bridge output");
                break;
            }
        }
    }
}

/// Newline-joined lines of one stream, shared with its reader so a timeout can still
/// return whatever arrived.
#[derive(Clone, Default)]
struct OutputBuffer(Arc<Mutex<Vec<String>>>);

impl OutputBuffer {
    fn push_line(&self, line: &str) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }

    fn snapshot(&self) -> String {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .join("\n")
    }
}
