//! Configured command set exposed as tools.
//!
//! A [`CommandCatalog`] is an explicit value built from loaded configuration
//! and handed to whatever serves the protocol. Input schemas are compiled
//! once, at construction.

use indexmap::IndexMap;
use thiserror::Error;

use crate::{ArgumentMap, ArgumentVector, CommandSpec, InputSchema, compile_command, compile_schema};

/// Errors from catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The invocation named a tool that is not configured.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Tool discovery entry for one command.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// The set of configured commands, keyed by tool name.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::*;
///
/// let catalog = CommandCatalog::from_commands([
///     ("echo_test", CommandSpec::new("echo", "Echo a message")
///         .with_parameter("message", ParameterSpec::new(ParamKind::String, "Message").at_position(0))),
/// ]);
///
/// assert_eq!(catalog.tools()[0].name, "echo_test");
///
/// let argv = catalog
///     .build_invocation("echo_test", &ArgumentMap::new().with("message", "hi"))
///     .unwrap();
/// assert_eq!(argv, ["echo", "hi"]);
///
/// assert_eq!(
///     catalog.resolve("nope").unwrap_err(),
///     CatalogError::UnknownCommand("nope".into())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    commands: IndexMap<String, CommandSpec>,
    tools: Vec<ToolDescriptor>,
}

impl CommandCatalog {
    /// Builds a catalog, compiling every input schema up front.
    pub fn new(commands: IndexMap<String, CommandSpec>) -> Self {
        let tools = commands
            .iter()
            .map(|(name, spec)| ToolDescriptor {
                name: name.clone(),
                description: spec.description.clone(),
                input_schema: compile_schema(Some(&spec.parameters)),
            })
            .collect();
        Self { commands, tools }
    }

    /// Builds a catalog from `(name, spec)` pairs, keeping their order.
    pub fn from_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = (S, CommandSpec)>,
        S: Into<String>,
    {
        Self::new(
            commands
                .into_iter()
                .map(|(name, spec)| (name.into(), spec))
                .collect(),
        )
    }

    /// Returns one descriptor per command, in configuration order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Looks up the spec backing a tool.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCommand`] when `name` is not configured.
    pub fn resolve(&self, name: &str) -> Result<&CommandSpec, CatalogError> {
        self.commands
            .get(name)
            .ok_or_else(|| CatalogError::UnknownCommand(name.to_string()))
    }

    /// Resolves a tool and compiles its argument vector.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCommand`] when `name` is not configured.
    pub fn build_invocation(
        &self,
        name: &str,
        args: &ArgumentMap,
    ) -> Result<ArgumentVector, CatalogError> {
        self.resolve(name).map(|spec| compile_command(spec, args))
    }

    /// Iterates `(name, spec)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSpec)> {
        self.commands.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}
