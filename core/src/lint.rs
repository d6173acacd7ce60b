//! Non-fatal configuration lints.
//!
//! Loading rejects documents that cannot describe a command at all. The
//! lints here catch specs that load fine but are probably not what the
//! operator meant, such as two parameters sharing a position.
//!
//! # Examples
//!
//! ```
//! use cli_mcp_mapper_core::*;
//!
//! let spec = CommandSpec::new("echo", "Echo")
//!     .with_parameter("a", ParameterSpec::new(ParamKind::String, "a").at_position(0))
//!     .with_parameter("b", ParameterSpec::new(ParamKind::String, "b").at_position(0));
//! let warnings = lint_command(&spec);
//! assert!(warnings.iter().any(|w| matches!(w, SpecWarning::DuplicatePosition { .. })));
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::{CommandCatalog, CommandSpec, ParamKind, positional_order};

/// A suspicious but loadable parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecWarning {
    /// Two positional parameters share a slot; declaration order decides.
    #[error("parameters '{first}' and '{second}' share position {position}")]
    DuplicatePosition {
        position: i64,
        first: String,
        second: String,
    },
    /// Positions are expected to be non-negative.
    #[error("parameter '{0}' has a negative position")]
    NegativePosition(String),
    /// A named non-boolean parameter will be emitted without a flag token.
    #[error("parameter '{0}' has neither 'position' nor 'argName'; its value is passed bare")]
    MissingArgName(String),
    /// A named boolean parameter without `argName` or `argValue` emits nothing.
    #[error("boolean parameter '{0}' has no 'argName' and can never appear in the command")]
    InertBoolean(String),
    /// `argName`/`argValue` are ignored for positional parameters.
    #[error("parameter '{0}' is positional; 'argName'/'argValue' are ignored")]
    IgnoredFlagFields(String),
    /// `argValue` is only used after boolean flags.
    #[error("parameter '{0}' is not boolean; 'argValue' is ignored")]
    IgnoredArgValue(String),
    /// `enum` values are strings; advertising them on other types confuses callers.
    #[error("parameter '{name}' declares 'enum' on a {kind} parameter")]
    EnumOnNonString { name: String, kind: ParamKind },
}

/// Lints one command spec.
pub fn lint_command(spec: &CommandSpec) -> Vec<SpecWarning> {
    let mut warnings = Vec::new();

    let mut seen: HashMap<i64, &str> = HashMap::new();
    for (name, param) in positional_order(spec) {
        let Some(position) = param.position else {
            continue;
        };
        if position < 0 {
            warnings.push(SpecWarning::NegativePosition(name.to_string()));
        }
        if let Some(first) = seen.get(&position) {
            warnings.push(SpecWarning::DuplicatePosition {
                position,
                first: (*first).to_string(),
                second: name.to_string(),
            });
        } else {
            seen.insert(position, name);
        }
    }

    for (name, param) in &spec.parameters {
        if param.is_positional() {
            if param.arg_name.is_some() || param.arg_value.is_some() {
                warnings.push(SpecWarning::IgnoredFlagFields(name.clone()));
            }
        } else if param.arg_name.is_none() {
            match param.kind {
                ParamKind::Boolean if param.arg_value.is_none() => {
                    warnings.push(SpecWarning::InertBoolean(name.clone()));
                }
                ParamKind::Boolean => {}
                ParamKind::String | ParamKind::Number => {
                    warnings.push(SpecWarning::MissingArgName(name.clone()));
                }
            }
        }

        if param.kind != ParamKind::Boolean && param.arg_value.is_some() && !param.is_positional()
        {
            warnings.push(SpecWarning::IgnoredArgValue(name.clone()));
        }

        if param.kind != ParamKind::String && param.enum_values.is_some() {
            warnings.push(SpecWarning::EnumOnNonString {
                name: name.clone(),
                kind: param.kind,
            });
        }
    }

    warnings
}

/// Lints every command in a catalog, returning `(tool name, warning)` pairs.
pub fn lint_catalog(catalog: &CommandCatalog) -> Vec<(String, SpecWarning)> {
    catalog
        .iter()
        .flat_map(|(name, spec)| {
            lint_command(spec)
                .into_iter()
                .map(move |warning| (name.to_string(), warning))
        })
        .collect()
}
