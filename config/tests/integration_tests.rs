use std::fs;
use std::path::{Path, PathBuf};

use cli_mcp_mapper_config::{ConfigError, MapperConfig};
use cli_mcp_mapper_core::ArgumentMap;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    write(dir, name, &serde_json::to_string_pretty(value).unwrap())
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        dir.path(),
        "commands.json",
        &serde_json::json!({
            "commands": {
                "find_files": {
                    "description": "Find files",
                    "command": "find",
                    "baseArgs": [],
                    "parameters": {
                        "path": {"type": "string", "description": "Start dir", "position": 0, "required": true},
                        "name": {"type": "string", "description": "Pattern", "argName": "-name"},
                        "maxdepth": {"type": "number", "description": "Depth", "argName": "-maxdepth", "default": 1}
                    }
                }
            }
        }),
    );

    let catalog = MapperConfig::load(&path).unwrap().into_catalog();
    assert_eq!(catalog.len(), 1);

    let tool = &catalog.tools()[0];
    assert_eq!(tool.name, "find_files");
    assert_eq!(tool.input_schema.required, vec!["path"]);
    assert_eq!(
        tool.input_schema.properties["maxdepth"].default,
        Some(serde_json::json!(1))
    );

    let args = ArgumentMap::new()
        .with("path", ".")
        .with("name", "*.rs")
        .with("maxdepth", 2);
    let argv = catalog.build_invocation("find_files", &args).unwrap();
    assert_eq!(argv, ["find", ".", "-name", "*.rs", "-maxdepth", "2"]);
}

#[test]
fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "commands.yaml",
        r#"
commands:
  echo_test:
    command: echo
    description: Echo a message
    parameters:
      message:
        type: string
        description: Message
        position: 0
"#,
    );

    let config = MapperConfig::load(&path).unwrap();
    assert_eq!(config.command_names().collect::<Vec<_>>(), vec!["echo_test"]);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nonexistent.json");

    let err = MapperConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(ref p) if p == &path));
    let message = err.to_string();
    assert!(message.contains("Configuration file not found"));
    assert!(message.contains(path.to_str().unwrap()));
}

#[test]
fn test_invalid_json_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "invalid-json.json", r#"{ "invalid": json }"#);

    let message = MapperConfig::load(&path).unwrap_err().to_string();
    assert!(message.contains("Invalid JSON syntax"));
    assert!(message.contains(path.to_str().unwrap()));
}

#[test]
fn test_missing_commands_object() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        dir.path(),
        "no-commands.json",
        &serde_json::json!({"notCommands": {}}),
    );

    let message = MapperConfig::load(&path).unwrap_err().to_string();
    assert!(message.contains("Invalid configuration structure"));
    assert!(message.contains("Expected \"commands\" object"));
}

#[test]
fn test_invalid_command_definitions_are_listed() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        dir.path(),
        "bad.json",
        &serde_json::json!({
            "commands": {
                "no_command": {"description": "Missing command field"},
                "no_description": {"command": "echo"}
            }
        }),
    );

    let Err(ConfigError::InvalidCommands(issues)) = MapperConfig::load(&path) else {
        panic!("expected InvalidCommands");
    };
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].to_string(), "no_command: missing or invalid 'command' field");
    assert_eq!(
        issues[1].to_string(),
        "no_description: missing or invalid 'description' field"
    );
}
