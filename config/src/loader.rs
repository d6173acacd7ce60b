//! Configuration path resolution and loading.
//!
//! # Path resolution
//!
//! 1. An explicit path (the `--config` flag).
//! 2. The `CLI_MCP_MAPPER_CONFIG` environment variable.
//! 3. `$HOME/.config/cli-mcp-mapper/commands.json`.
//!
//! # Document format
//!
//! ```json
//! {
//!   "commands": {
//!     "git_commit": {
//!       "command": "git",
//!       "baseArgs": ["commit"],
//!       "description": "Commit staged changes",
//!       "parameters": {
//!         "message": { "type": "string", "description": "Message", "required": true, "argName": "-m" },
//!         "all": { "type": "boolean", "description": "Stage tracked files", "argName": "-a" }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML with the same shape.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cli_mcp_mapper_core::{CommandCatalog, CommandSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::validate::validate_document;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "CLI_MCP_MAPPER_CONFIG";

/// Syntax of a configuration file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml`/`.yml` → YAML; anything else → JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli_mcp_mapper_config::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path("commands.yml"), ConfigFormat::Yaml);
    /// assert_eq!(ConfigFormat::from_path("commands.json"), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path("commands"), ConfigFormat::Json);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Returns `$HOME/.config/cli-mcp-mapper/commands.json`, if a home
/// directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("cli-mcp-mapper")
            .join("commands.json")
    })
}

/// Resolves the configuration path from an explicit value, the environment,
/// or the default location, in that order.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigPath`] when none of the three is available.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_config_path().ok_or(ConfigError::NoConfigPath(CONFIG_ENV_VAR))
}

/// A loaded configuration document.
///
/// Command order follows the document, which fixes tool listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    pub commands: IndexMap<String, CommandSpec>,
}

impl MapperConfig {
    /// Reads, validates, and deserializes a configuration file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] if nothing exists at `path`.
    /// - [`ConfigError::Io`] for other read failures.
    /// - [`ConfigError::Syntax`] for malformed JSON/YAML.
    /// - [`ConfigError::InvalidStructure`] / [`ConfigError::InvalidCommands`]
    ///   for documents of the wrong shape.
    /// - [`ConfigError::Schema`] for mistyped fields such as an unknown
    ///   parameter `type`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading configuration");

        let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let config = Self::parse(&text, ConfigFormat::from_path(path), path)?;
        info!(
            path = %path.display(),
            commands = config.commands.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parses configuration text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the file-access errors.
    pub fn parse(text: &str, format: ConfigFormat, path: &Path) -> Result<Self> {
        let document: serde_json::Value = match format {
            ConfigFormat::Json => {
                serde_json::from_str::<serde_json::Value>(text).map_err(|e| e.to_string())
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str::<serde_json::Value>(text).map_err(|e| e.to_string())
            }
        }
        .map_err(|message| ConfigError::Syntax {
            path: path.to_path_buf(),
            format: format.name(),
            message,
        })?;

        validate_document(&document)?;

        serde_json::from_value(document).map_err(|source| ConfigError::Schema {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Names of all configured commands, in document order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Converts into the catalog served to protocol callers.
    pub fn into_catalog(self) -> CommandCatalog {
        CommandCatalog::new(self.commands)
    }
}
