//! Structural validation of raw configuration documents.
//!
//! Runs on the parsed JSON value before typed deserialization so that each
//! bad command entry can be reported by name, rather than stopping at the
//! first serde error.

use serde_json::Value;

use crate::error::{CommandIssue, ConfigError, Result};

/// Checks the document shape and every command entry.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidStructure`] when the document is not an
/// object holding a `commands` object, and [`ConfigError::InvalidCommands`]
/// listing every entry with a missing or mistyped required field.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_config::{ConfigError, validate_document};
///
/// let ok = serde_json::json!({"commands": {"hi": {"command": "echo", "description": "Say hi"}}});
/// assert!(validate_document(&ok).is_ok());
///
/// let missing = serde_json::json!({"commands": {"hi": {"description": "Say hi"}}});
/// let Err(ConfigError::InvalidCommands(issues)) = validate_document(&missing) else {
///     panic!("expected invalid commands");
/// };
/// assert_eq!(issues[0].reason, "missing or invalid 'command' field");
/// ```
pub fn validate_document(document: &Value) -> Result<()> {
    let Some(root) = document.as_object() else {
        return Err(ConfigError::InvalidStructure(
            "Expected a JSON object at the top level".to_string(),
        ));
    };
    let Some(commands) = root.get("commands").and_then(Value::as_object) else {
        return Err(ConfigError::InvalidStructure(
            "Expected \"commands\" object".to_string(),
        ));
    };

    let mut issues = Vec::new();
    for (name, definition) in commands {
        for reason in command_issues(definition) {
            issues.push(CommandIssue {
                name: name.clone(),
                reason: reason.to_string(),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::InvalidCommands(issues))
    }
}

fn command_issues(definition: &Value) -> Vec<&'static str> {
    let Some(definition) = definition.as_object() else {
        return vec!["command definition must be an object"];
    };

    let mut issues = Vec::new();
    if !is_non_empty_string(definition.get("command")) {
        issues.push("missing or invalid 'command' field");
    }
    if !is_non_empty_string(definition.get("description")) {
        issues.push("missing or invalid 'description' field");
    }
    match definition.get("baseArgs") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => {}
        Some(_) => issues.push("invalid 'baseArgs' field: expected an array of strings"),
    }
    match definition.get("parameters") {
        None | Some(Value::Null) | Some(Value::Object(_)) => {}
        Some(_) => issues.push("invalid 'parameters' field: expected an object"),
    }
    issues
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}
