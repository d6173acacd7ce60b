//! Error types for configuration loading.
//!
//! Covers every way a configuration document can fail to become a
//! [`CommandCatalog`](cli_mcp_mapper_core::CommandCatalog): missing file,
//! unparsable text, wrong document shape, and invalid command entries.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One command entry that failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandIssue {
    /// Tool name (key under `commands`).
    pub name: String,
    /// What is wrong with it.
    pub reason: String,
}

impl fmt::Display for CommandIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No file at the resolved path.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON (or YAML, for `.yaml`/`.yml` files).
    #[error("Invalid {format} syntax in configuration file {}: {message}", .path.display())]
    Syntax {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    /// The document is not an object with a `commands` object.
    #[error("Invalid configuration structure. {0}")]
    InvalidStructure(String),

    /// One or more command entries are missing required fields.
    #[error("Invalid command definitions: {}", join_issues(.0))]
    InvalidCommands(Vec<CommandIssue>),

    /// The document has the right shape but a field has the wrong type
    /// (e.g. an unknown parameter `type`).
    #[error("Invalid configuration in {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No `--config`, no environment variable, and no home directory.
    #[error("Could not determine configuration path: set {0} or pass --config")]
    NoConfigPath(&'static str),
}

fn join_issues(issues: &[CommandIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
