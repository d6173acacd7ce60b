//! Command specifications compiled into MCP tool schemas and argument vectors.
//!
//! This crate is the pure half of `cli-mcp-mapper`:
//!
//! - [`CommandSpec`] / [`ParameterSpec`]: the declarative command model read
//!   from configuration.
//! - [`compile_schema`]: parameters → JSON Schema object for tool discovery.
//! - [`compile_command`]: spec + caller arguments → [`ArgumentVector`], the
//!   literal argv words of one process invocation.
//! - [`CommandCatalog`]: the configured tool set, passed around as an
//!   explicit value.
//! - [`lint_command`]: warnings for loadable but suspicious specs.
//!
//! Nothing here spawns processes; see the `cli-mcp-mapper-exec` crate.
//!
//! # Example
//!
//! ```
//! use cli_mcp_mapper_core::*;
//!
//! let spec = CommandSpec::new("ls", "List directory contents")
//!     .with_parameter("path", ParameterSpec::new(ParamKind::String, "Directory").at_position(0))
//!     .with_parameter("all", ParameterSpec::new(ParamKind::Boolean, "Show hidden").with_arg_name("-a"));
//!
//! let schema = compile_schema(Some(&spec.parameters));
//! assert_eq!(schema.properties.len(), 2);
//!
//! let argv = compile_command(&spec, &ArgumentMap::new().with("path", "/tmp").with("all", true));
//! assert_eq!(argv, ["ls", "/tmp", "-a"]);
//! ```

mod catalog;
mod command;
mod lint;
mod schema;
mod types;

pub use catalog::{CatalogError, CommandCatalog, ToolDescriptor};
pub use command::{compile_command, positional_order};
pub use lint::{SpecWarning, lint_catalog, lint_command};
pub use schema::{InputSchema, PropertyDescriptor, compile_schema};
pub use types::*;
