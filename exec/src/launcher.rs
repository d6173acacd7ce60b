//! Child process launching.
//!
//! [`ProcessLauncher`] is the one seam between the executor and the OS. The
//! production implementation, [`TokioLauncher`], passes the program and its
//! arguments straight to process creation; no shell is ever involved.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Everything captured from one finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    /// Exit code, or `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RawOutput {
    /// Output of a child that exited with `code`.
    pub fn exited(code: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Launches a program with a literal argument array and waits for it.
///
/// Implementations must not route the invocation through a shell or any
/// other layer that re-parses a command line. An `Err` means the process
/// could not be started (or waited on); a started process that fails is an
/// `Ok` with a non-zero [`RawOutput::exit_code`].
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn launch(&self, program: &str, args: &[String]) -> io::Result<RawOutput>;
}

/// Launches real child processes with `tokio::process`.
///
/// Stdin is closed. Stdout and stderr are piped into buffers owned by this
/// call and drained concurrently while waiting for exit, so a chatty child
/// cannot fill one pipe and stall. The child is not killed if the returned
/// future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLauncher;

#[async_trait]
impl ProcessLauncher for TokioLauncher {
    async fn launch(&self, program: &str, args: &[String]) -> io::Result<RawOutput> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        debug!(program, pid = ?child.id(), "Spawned child process");

        let output = child.wait_with_output().await?;
        Ok(RawOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
