//! Shell-free execution of compiled argument vectors.
//!
//! The executor takes an [`ArgumentVector`](cli_mcp_mapper_core::ArgumentVector)
//! built by `cli-mcp-mapper-core`, launches `argv[0]` with the remaining words
//! as a literal argument array, and normalizes the result:
//!
//! - [`ExecutionOutcome::Success`]: exit code 0; stdout, or stderr when
//!   stdout is empty.
//! - [`ExecutionOutcome::Failed`]: the command ran and exited non-zero.
//! - [`ExecError::Launch`]: the command could not be started at all.
//!
//! Process creation sits behind the [`ProcessLauncher`] trait; use
//! [`TokioLauncher`] for real processes.

mod executor;
mod launcher;

pub use executor::{ExecError, ExecutionOutcome, SafeExecutor};
pub use launcher::{ProcessLauncher, RawOutput, TokioLauncher};
