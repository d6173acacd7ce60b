//! Tool invocation, independent of the protocol transport.
//!
//! [`ToolDispatcher`] turns one `(tool name, raw JSON arguments)` request into
//! the text payload returned to the caller. The MCP server in
//! [`crate::server`] only maps [`DispatchError`] onto protocol error codes.

use std::sync::Arc;

use cli_mcp_mapper_core::{
    ArgumentError, ArgumentMap, CatalogError, CommandCatalog, compile_command,
};
use cli_mcp_mapper_exec::{ExecError, ProcessLauncher, SafeExecutor, TokioLauncher};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a tool call produced no text result.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownCommand(#[from] CatalogError),
    #[error(transparent)]
    InvalidArguments(#[from] ArgumentError),
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Resolves, compiles, and executes tool calls against a catalog.
#[derive(Debug, Clone)]
pub struct ToolDispatcher<L = TokioLauncher> {
    catalog: Arc<CommandCatalog>,
    executor: SafeExecutor<L>,
}

impl ToolDispatcher<TokioLauncher> {
    pub fn new(catalog: CommandCatalog) -> Self {
        Self::with_executor(catalog, SafeExecutor::new())
    }
}

impl<L: ProcessLauncher> ToolDispatcher<L> {
    pub fn with_executor(catalog: CommandCatalog, executor: SafeExecutor<L>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            executor,
        }
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    /// Runs one tool call and returns its text payload.
    ///
    /// A command that starts but exits non-zero is still `Ok`: the text then
    /// begins with `Command exited with code N`.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnknownCommand`] when `name` is not configured.
    /// - [`DispatchError::InvalidArguments`] for array or object values.
    /// - [`DispatchError::Exec`] when the process cannot be started.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<String, DispatchError> {
        let spec = self.catalog.resolve(name)?;
        let args = match arguments {
            Some(object) => ArgumentMap::from_json(object)?,
            None => ArgumentMap::new(),
        };

        let argv = compile_command(spec, &args);
        debug!(tool = name, argv = %argv, "Compiled tool invocation");

        let outcome = self.executor.execute(&argv).await?;
        info!(
            tool = name,
            success = outcome.is_success(),
            exit_code = ?outcome.exit_code(),
            "Tool call finished"
        );
        Ok(outcome.into_text())
    }
}
