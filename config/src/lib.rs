//! Configuration loading for `cli-mcp-mapper`.
//!
//! Resolves where the command configuration lives, reads it as JSON (or
//! YAML), checks its structure, and produces a typed [`MapperConfig`] that
//! converts into a [`CommandCatalog`](cli_mcp_mapper_core::CommandCatalog).
//!
//! # Quick start
//!
//! ```no_run
//! use cli_mcp_mapper_config::{MapperConfig, resolve_config_path};
//!
//! let path = resolve_config_path(None).unwrap();
//! let catalog = MapperConfig::load(&path).unwrap().into_catalog();
//! for tool in catalog.tools() {
//!     println!("{}: {}", tool.name, tool.description);
//! }
//! ```

mod error;
mod loader;
mod validate;

pub use error::{CommandIssue, ConfigError, Result};
pub use loader::{
    CONFIG_ENV_VAR, ConfigFormat, MapperConfig, default_config_path, resolve_config_path,
};
pub use validate::validate_document;
