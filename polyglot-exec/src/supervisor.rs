use nix::errno::Errno;
use nix::sys::resource::{setrlimit, Resource};
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tracing::{debug, warn};

use crate::{
    config::{EngineConfig, ResourceLimits},
    error::Error,
    template::ExpandedCommand,
    types::ProcessOutcome,
    Result,
};

/// Spawns, times out and reaps one external process per call
#[derive(Debug, Clone)]
pub struct Supervisor {
    limits: ResourceLimits,
    max_output_bytes: usize,
    teardown_grace: Duration,
    env: Vec<(String, String)>,
}

impl Supervisor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            limits: config.limits.clone(),
            max_output_bytes: config.max_output_bytes,
            teardown_grace: config.teardown_grace,
            env: config
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Run `command` to completion or until `timeout` fires.
    ///
    /// A non-zero exit or a timeout is reported through the returned
    /// [`ProcessOutcome`]; only a failure to spawn is an error.
    pub async fn run(
        &self,
        command: &ExpandedCommand,
        working_dir: &Path,
        timeout: Duration,
        stdin: Option<&str>,
        extra_env: &[(&str, &str)],
    ) -> Result<ProcessOutcome> {
        debug!("Supervisor run - Command: {}", command);
        debug!("Supervisor run - Working dir: {:?}", working_dir);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .envs(extra_env.iter().copied())
            .current_dir(working_dir)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            // own process group, so a timeout can take down helpers the
            // toolchain forks along with the direct child
            .process_group(0);

        let limits = self.limits.clone();
        // SAFETY: the closure only calls setrlimit, which is async-signal-safe
        unsafe {
            cmd.pre_exec(move || apply_limits(&limits).map_err(std::io::Error::from));
        }

        let started = Instant::now();
        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            program: command.program.clone(),
            source,
        })?;
        let pid = child.id();

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            let input = input.to_string();
            tokio::spawn(async move {
                // the program may exit without reading; a broken pipe is expected then
                if let Err(e) = pipe.write_all(input.as_bytes()).await {
                    debug!("Failed to write stdin: {}", e);
                }
            });
        }

        let stdout = spawn_reader(child.stdout.take(), self.max_output_bytes);
        let stderr = spawn_reader(child.stderr.take(), self.max_output_bytes);

        let (exit_status, timed_out) = match time::timeout(timeout, child.wait()).await {
            Ok(status) => (Some(status?), false),
            Err(_) => {
                warn!(
                    "Process `{}` timed out after {:?}, killing it",
                    command.program, timeout
                );
                kill_group(pid);
                if let Err(e) = child.kill().await {
                    debug!("Failed to kill timed-out process: {}", e);
                }
                (None, true)
            }
        };
        // reap anything the program left running in its group
        kill_group(pid);

        let (stdout, stderr) = self.collect(stdout, stderr).await;

        let outcome = ProcessOutcome {
            stdout: String::from_utf8_lossy(&stdout.bytes).into_owned(),
            stderr: String::from_utf8_lossy(&stderr.bytes).into_owned(),
            exit_code: exit_status.and_then(|s| s.code()),
            signal: exit_status.and_then(|s| s.signal()),
            timed_out,
            truncated: stdout.truncated || stderr.truncated,
            elapsed: started.elapsed(),
        };

        debug!(
            "Process `{}` finished: exit={:?} signal={:?} timed_out={} in {:?}",
            command.program, outcome.exit_code, outcome.signal, outcome.timed_out, outcome.elapsed
        );

        Ok(outcome)
    }

    /// Wait for both readers to hit EOF. Past `teardown_grace` the readers
    /// are stopped and whatever they captured so far is kept, marked truncated.
    async fn collect(&self, stdout: Reader, stderr: Reader) -> (Captured, Captured) {
        let Reader { task: out_task, buffer: out_buffer } = stdout;
        let Reader { task: err_task, buffer: err_buffer } = stderr;
        let out_abort = out_task.abort_handle();
        let err_abort = err_task.abort_handle();

        let drained = time::timeout(self.teardown_grace, async move {
            let _ = tokio::join!(out_task, err_task);
        })
        .await;

        if drained.is_err() {
            // an escaped grandchild is still holding a pipe open
            warn!("Output pipes still open after {:?}", self.teardown_grace);
            out_abort.abort();
            err_abort.abort();
        }

        let mut out = take_captured(&out_buffer);
        let mut err = take_captured(&err_buffer);
        if drained.is_err() {
            out.truncated = true;
            err.truncated = true;
        }
        (out, err)
    }
}

#[derive(Debug, Default)]
struct Captured {
    bytes: Vec<u8>,
    truncated: bool,
}

type SharedCapture = Arc<Mutex<Captured>>;

/// A pipe reader task and the buffer it fills as it goes
struct Reader {
    task: JoinHandle<()>,
    buffer: SharedCapture,
}

fn take_captured(buffer: &SharedCapture) -> Captured {
    let mut guard = buffer.lock().unwrap_or_else(PoisonError::into_inner);
    std::mem::take(&mut *guard)
}

fn apply_limits(limits: &ResourceLimits) -> std::result::Result<(), Errno> {
    if limits.cpu_time > 0 {
        setrlimit(Resource::RLIMIT_CPU, limits.cpu_time, limits.cpu_time)?;
    }
    if limits.file_size > 0 {
        setrlimit(Resource::RLIMIT_FSIZE, limits.file_size, limits.file_size)?;
    }
    Ok(())
}

fn kill_group(pid: Option<u32>) {
    if let Some(pid) = pid {
        match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => debug!("killpg({}) failed: {}", pid, e),
        }
    }
}

fn spawn_reader<R>(reader: Option<R>, cap: usize) -> Reader
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buffer = SharedCapture::default();
    let sink = Arc::clone(&buffer);
    let task = tokio::spawn(async move {
        if let Some(reader) = reader {
            read_capped(reader, cap, &sink).await;
        }
    });
    Reader { task, buffer }
}

/// Read to EOF, keeping at most `cap` bytes in `sink`. The rest is drained
/// and dropped so the writer never blocks on a full pipe.
async fn read_capped<R: AsyncRead + Unpin>(mut reader: R, cap: usize, sink: &SharedCapture) {
    let mut chunk = [0u8; 8192];

    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                let mut captured = sink.lock().unwrap_or_else(PoisonError::into_inner);
                let room = cap.saturating_sub(captured.bytes.len());
                if n > room {
                    captured.bytes.extend_from_slice(&chunk[..room]);
                    captured.truncated = true;
                } else {
                    captured.bytes.extend_from_slice(&chunk[..n]);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Output read failed: {}", e);
                break;
            }
        }
    }
}
