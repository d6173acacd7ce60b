//! Argument-vector execution with normalized results.
//!
//! [`SafeExecutor`] runs a compiled [`ArgumentVector`] and folds the child's
//! exit status and streams into one of three outcomes:
//!
//! | Situation                     | Result                                         |
//! |-------------------------------|------------------------------------------------|
//! | exit code 0                   | `Ok(ExecutionOutcome::Success)`, stdout or stderr |
//! | non-zero exit / signal        | `Ok(ExecutionOutcome::Failed)`, code + stderr   |
//! | process could not be started  | `Err(ExecError::Launch)`                        |
//!
//! A failing command is valid domain output, so it is an `Ok`.

use std::fmt;
use std::io;
use std::sync::Arc;

use cli_mcp_mapper_core::ArgumentVector;
use thiserror::Error;
use tracing::debug;

use crate::launcher::{ProcessLauncher, RawOutput, TokioLauncher};

/// Errors that prevent a command from running at all.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The OS refused to start the program (not found, permission denied, ...).
    #[error("Failed to execute command: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The vector had no program word.
    #[error("Failed to execute command: empty argument vector")]
    EmptyVector,
}

/// Result of a command that was started and ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Exit code 0. Holds stdout, or stderr when stdout was empty.
    Success { output: String },
    /// Non-zero exit code, or `exit_code: None` when killed by a signal.
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

impl ExecutionOutcome {
    /// Normalizes raw process output.
    pub fn from_raw(raw: RawOutput) -> Self {
        match raw.exit_code {
            Some(0) => {
                let output = if raw.stdout.is_empty() {
                    String::from_utf8_lossy(&raw.stderr).into_owned()
                } else {
                    String::from_utf8_lossy(&raw.stdout).into_owned()
                };
                Self::Success { output }
            }
            exit_code => Self::Failed {
                exit_code,
                stderr: String::from_utf8_lossy(&raw.stderr).into_owned(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Exit code: `Some(0)` on success, `None` for signal termination.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Success { .. } => Some(0),
            Self::Failed { exit_code, .. } => *exit_code,
        }
    }

    /// Renders the single text payload returned to protocol callers.
    ///
    /// Failures always carry a `Command exited with code N` marker, even when
    /// the command wrote nothing to stderr.
    pub fn into_text(self) -> String {
        match self {
            Self::Success { output } => output,
            failed @ Self::Failed { .. } => failed.to_string(),
        }
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { output } => f.write_str(output),
            Self::Failed {
                exit_code: Some(code),
                stderr,
            } => write!(f, "Command exited with code {code}\n{stderr}"),
            Self::Failed {
                exit_code: None,
                stderr,
            } => write!(f, "Command terminated by signal\n{stderr}"),
        }
    }
}

/// Runs argument vectors without shell interpretation.
///
/// Generic over its [`ProcessLauncher`] so the outcome rules can be tested
/// without real processes. Holds no per-call state: each [`execute`] owns
/// its buffers, and concurrent calls are independent.
///
/// [`execute`]: SafeExecutor::execute
///
/// # Examples
///
/// ```no_run
/// use cli_mcp_mapper_core::ArgumentVector;
/// use cli_mcp_mapper_exec::{ExecutionOutcome, SafeExecutor};
///
/// # async fn run() -> Result<(), cli_mcp_mapper_exec::ExecError> {
/// let executor = SafeExecutor::new();
/// let argv: ArgumentVector = ["echo", "$(whoami)"].into_iter().collect();
/// let outcome = executor.execute(&argv).await?;
/// assert_eq!(outcome, ExecutionOutcome::Success { output: "$(whoami)\n".into() });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SafeExecutor<L = TokioLauncher> {
    launcher: Arc<L>,
}

impl SafeExecutor<TokioLauncher> {
    /// Creates an executor that spawns real processes.
    pub fn new() -> Self {
        Self::with_launcher(TokioLauncher)
    }
}

impl Default for SafeExecutor<TokioLauncher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ProcessLauncher> SafeExecutor<L> {
    /// Creates an executor around a custom launcher.
    pub fn with_launcher(launcher: L) -> Self {
        Self {
            launcher: Arc::new(launcher),
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Runs `argv[0]` with `argv[1..]` as its literal arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Launch`] when the process cannot be started and
    /// [`ExecError::EmptyVector`] when `argv` is empty. A non-zero exit is
    /// not an error.
    pub async fn execute(&self, argv: &ArgumentVector) -> Result<ExecutionOutcome, ExecError> {
        let program = argv.program().ok_or(ExecError::EmptyVector)?;
        let args = argv.args();

        debug!(program, argc = args.len(), "Executing command");

        let raw = self
            .launcher
            .launch(program, args)
            .await
            .map_err(|source| {
                debug!(program, error = %source, "Failed to launch command");
                ExecError::Launch {
                    program: program.to_string(),
                    source,
                }
            })?;

        debug!(
            program,
            exit_code = ?raw.exit_code,
            stdout_bytes = raw.stdout.len(),
            stderr_bytes = raw.stderr.len(),
            "Command finished"
        );

        Ok(ExecutionOutcome::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Launcher that records calls and replays a canned result.
    struct FakeLauncher {
        result: Mutex<Option<io::Result<RawOutput>>>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl FakeLauncher {
        fn returning(result: io::Result<RawOutput>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProcessLauncher for FakeLauncher {
        async fn launch(&self, program: &str, args: &[String]) -> io::Result<RawOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("launcher called more than once")
        }
    }

    fn argv(words: &[&str]) -> ArgumentVector {
        words.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_splits_program_and_args() {
        let executor =
            SafeExecutor::with_launcher(FakeLauncher::returning(Ok(RawOutput::exited(0, "", ""))));
        executor
            .execute(&argv(&["git", "commit", "-m", "a b; c"]))
            .await
            .unwrap();
        let calls = executor.launcher.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "git");
        assert_eq!(calls[0].1, vec!["commit", "-m", "a b; c"]);
    }

    #[tokio::test]
    async fn test_success_prefers_stdout() {
        let executor = SafeExecutor::with_launcher(FakeLauncher::returning(Ok(
            RawOutput::exited(0, "out", "err"),
        )));
        let outcome = executor.execute(&argv(&["x"])).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Success { output: "out".into() });
    }

    #[tokio::test]
    async fn test_silent_success_falls_back_to_stderr() {
        let executor = SafeExecutor::with_launcher(FakeLauncher::returning(Ok(
            RawOutput::exited(0, "", "progress on stderr"),
        )));
        let outcome = executor.execute(&argv(&["x"])).await.unwrap();
        assert_eq!(outcome.into_text(), "progress on stderr");
    }

    #[tokio::test]
    async fn test_success_with_no_output_is_empty_text() {
        let executor =
            SafeExecutor::with_launcher(FakeLauncher::returning(Ok(RawOutput::exited(0, "", ""))));
        let outcome = executor.execute(&argv(&["true"])).await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.into_text(), "");
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_still_reports_code() {
        let executor =
            SafeExecutor::with_launcher(FakeLauncher::returning(Ok(RawOutput::exited(1, "", ""))));
        let outcome = executor.execute(&argv(&["false"])).await.unwrap();
        assert_eq!(outcome.exit_code(), Some(1));
        assert_eq!(outcome.into_text(), "Command exited with code 1\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_ignores_stdout() {
        let executor = SafeExecutor::with_launcher(FakeLauncher::returning(Ok(
            RawOutput::exited(2, "partial", "boom"),
        )));
        let outcome = executor.execute(&argv(&["x"])).await.unwrap();
        assert_eq!(
            outcome,
            ExecutionOutcome::Failed {
                exit_code: Some(2),
                stderr: "boom".into()
            }
        );
        assert_eq!(outcome.into_text(), "Command exited with code 2\nboom");
    }

    #[tokio::test]
    async fn test_signal_termination() {
        let executor = SafeExecutor::with_launcher(FakeLauncher::returning(Ok(RawOutput {
            exit_code: None,
            stdout: Vec::new(),
            stderr: b"killed".to_vec(),
        })));
        let outcome = executor.execute(&argv(&["x"])).await.unwrap();
        assert!(!outcome.is_success());
        assert_eq!(outcome.exit_code(), None);
        assert_eq!(outcome.into_text(), "Command terminated by signal\nkilled");
    }

    #[tokio::test]
    async fn test_launch_failure_is_an_error() {
        let executor = SafeExecutor::with_launcher(FakeLauncher::returning(Err(
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        )));
        let err = executor.execute(&argv(&["/etc/passwd"])).await.unwrap_err();
        match &err {
            ExecError::Launch { program, source } => {
                assert_eq!(program, "/etc/passwd");
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Failed to execute command: permission denied");
    }

    #[tokio::test]
    async fn test_empty_vector() {
        let executor =
            SafeExecutor::with_launcher(FakeLauncher::returning(Ok(RawOutput::default())));
        let err = executor.execute(&argv(&[])).await.unwrap_err();
        assert!(matches!(err, ExecError::EmptyVector));
        assert!(executor.launcher.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let outcome = ExecutionOutcome::from_raw(RawOutput::exited(0, vec![0x66, 0xff, 0x6f], ""));
        assert_eq!(outcome.into_text(), "f\u{fffd}o");
    }
}
