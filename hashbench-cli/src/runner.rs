//! Benchmark Runner
//!
//! Invokes the external hash-table executable once per run and waits for it
//! under a timeout. A run that exceeds the timeout, or is cancelled, receives
//! SIGTERM, then a grace period, then SIGKILL. The CSV artifact's existence
//! after exit is authoritative for success.

use crate::cancel::CancelToken;
use hashbench_core::BenchmarkSpec;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default per-run timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);
/// Default time between SIGTERM and SIGKILL
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(500);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Why a run produced no artifact; the sweep continues without it
#[derive(Debug, Error)]
pub enum ExecutionWarning {
    #[error("failed to run {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("executable exited with status {code}")]
    NonZeroExit { code: i32 },

    #[error("executable was killed by signal {signal}")]
    Signalled { signal: i32 },

    #[error("executable exited successfully but did not write {path}")]
    MissingArtifact { path: PathBuf },

    #[error("cannot remove leftover artifact {path}: {source}")]
    StaleArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("run exceeded the {timeout:?} timeout")]
    TimedOut { timeout: Duration },

    #[error("run cancelled")]
    Cancelled,
}

impl ExecutionWarning {
    /// Short tag used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionWarning::Spawn { .. } => "spawn",
            ExecutionWarning::NonZeroExit { .. } => "non_zero_exit",
            ExecutionWarning::Signalled { .. } => "signalled",
            ExecutionWarning::MissingArtifact { .. } => "missing_artifact",
            ExecutionWarning::StaleArtifact { .. } => "stale_artifact",
            ExecutionWarning::TimedOut { .. } => "timed_out",
            ExecutionWarning::Cancelled => "cancelled",
        }
    }
}

/// Send SIGTERM to a process. Returns `Err` if the signal could not be delivered.
#[cfg(unix)]
fn send_sigterm(pid: u32) -> Result<(), std::io::Error> {
    let ret = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
    if ret == -1 {
        Err(std::io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(not(unix))]
fn send_sigterm(_pid: u32) -> Result<(), std::io::Error> {
    Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Runs benchmark specs against one executable
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    executable: PathBuf,
    results_dir: PathBuf,
    timeout: Duration,
    grace_period: Duration,
    cancel: CancelToken,
}

impl BenchmarkRunner {
    /// Create a runner with default timeout and grace period
    pub fn new(executable: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            results_dir: results_dir.into(),
            timeout: DEFAULT_TIMEOUT,
            grace_period: DEFAULT_GRACE_PERIOD,
            cancel: CancelToken::new(),
        }
    }

    /// Set the per-run timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the SIGTERM grace period
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Poll `cancel` while waiting on the executable
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Directory artifacts are written to
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Where a spec's artifact will be written
    pub fn artifact_path(&self, spec: &BenchmarkSpec) -> PathBuf {
        spec.output_path(&self.results_dir)
    }

    /// Program and arguments for a spec, in invocation order
    pub fn command_line(&self, spec: &BenchmarkSpec) -> Vec<String> {
        vec![
            self.executable.display().to_string(),
            "--mode".to_string(),
            spec.mode.clone(),
            "--probe".to_string(),
            spec.probe.clone(),
            "--hash".to_string(),
            spec.hash.clone(),
            "--num-tests".to_string(),
            spec.num_tests.to_string(),
            "--load-factor".to_string(),
            spec.load_factor_arg(),
            "--output-file".to_string(),
            self.artifact_path(spec).display().to_string(),
        ]
    }

    fn command(&self, spec: &BenchmarkSpec) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("--mode")
            .arg(&spec.mode)
            .arg("--probe")
            .arg(&spec.probe)
            .arg("--hash")
            .arg(&spec.hash)
            .arg("--num-tests")
            .arg(spec.num_tests.to_string())
            .arg("--load-factor")
            .arg(spec.load_factor_arg())
            .arg("--output-file")
            .arg(self.artifact_path(spec))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Create the results directory
    pub fn prepare(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.results_dir)
    }

    /// Run one spec to completion and return its artifact path
    ///
    /// A leftover artifact from an earlier sweep is removed first so that
    /// only this invocation can satisfy the existence check.
    pub fn run(&self, spec: &BenchmarkSpec) -> Result<PathBuf, ExecutionWarning> {
        if self.cancel.is_cancelled() {
            return Err(ExecutionWarning::Cancelled);
        }

        let artifact = self.artifact_path(spec);
        if artifact.exists() {
            tracing::debug!(path = %artifact.display(), "removing stale artifact");
            std::fs::remove_file(&artifact).map_err(|source| ExecutionWarning::StaleArtifact {
                path: artifact.clone(),
                source,
            })?;
        }

        tracing::debug!(command = ?self.command_line(spec), "spawning benchmark");
        let spawn_error = |source| ExecutionWarning::Spawn {
            executable: self.executable.clone(),
            source,
        };
        let mut child = self.command(spec).spawn().map_err(spawn_error)?;

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    self.terminate(&mut child);
                    return Err(spawn_error(e));
                }
            }

            if self.cancel.is_cancelled() {
                self.terminate(&mut child);
                return Err(ExecutionWarning::Cancelled);
            }
            if started.elapsed() >= self.timeout {
                self.terminate(&mut child);
                return Err(ExecutionWarning::TimedOut {
                    timeout: self.timeout,
                });
            }

            std::thread::sleep(POLL_INTERVAL);
        };

        tracing::debug!(
            status = %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "benchmark exited"
        );

        if !status.success() {
            return Err(match (status.code(), termination_signal(&status)) {
                (Some(code), _) => ExecutionWarning::NonZeroExit { code },
                (None, Some(signal)) => ExecutionWarning::Signalled { signal },
                (None, None) => ExecutionWarning::NonZeroExit { code: -1 },
            });
        }

        if !artifact.exists() {
            return Err(ExecutionWarning::MissingArtifact { path: artifact });
        }

        Ok(artifact)
    }

    /// SIGTERM, wait out the grace period, then SIGKILL.
    fn terminate(&self, child: &mut Child) {
        // Ignore error: the child may already have exited
        let _ = send_sigterm(child.id());

        let deadline = Instant::now() + self.grace_period;
        while Instant::now() < deadline {
            match child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(_) => break,
            }
        }

        // Force kill if still alive
        let _ = child.kill();
        let _ = child.wait();
    }
}
