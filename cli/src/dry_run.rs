//! `--dry-run`: load and check the configuration, report, and exit.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cli_mcp_mapper_config::{ConfigError, MapperConfig, resolve_config_path};
use cli_mcp_mapper_core::lint_catalog;

/// Validates the configuration, writing the report to `out` and failures to
/// `err`. Returns the process exit code.
pub fn run(config: Option<&Path>, out: &mut impl Write, err: &mut impl Write) -> io::Result<i32> {
    match load(config) {
        Ok((path, config)) => {
            report(&path, config, out)?;
            Ok(0)
        }
        Err(error) => {
            writeln!(err, "Error: {error}")?;
            if let ConfigError::InvalidCommands(issues) = &error {
                for issue in issues {
                    writeln!(err, "  ✗ {}: {}", issue.name, issue.reason)?;
                }
            }
            Ok(1)
        }
    }
}

fn load(config: Option<&Path>) -> Result<(PathBuf, MapperConfig), ConfigError> {
    let path = resolve_config_path(config)?;
    let config = MapperConfig::load(&path)?;
    Ok((path, config))
}

fn report(path: &Path, config: MapperConfig, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Configuration loaded successfully from: {}", path.display())?;
    writeln!(out, "Found {} command(s):", config.commands.len())?;
    for (name, spec) in &config.commands {
        writeln!(out, "  ✓ {name}: {}", spec.description)?;
    }

    let warnings = lint_catalog(&config.into_catalog());
    if !warnings.is_empty() {
        writeln!(out, "Warnings:")?;
        for (tool, warning) in &warnings {
            writeln!(out, "  ! {tool}: {warning}")?;
        }
    }

    writeln!(out, "Dry-run completed successfully")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn dry_run(path: &Path) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(Some(path), &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_valid_configuration_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commands.json");
        fs::write(
            &path,
            r#"{"commands": {
                "echo_test": {"command": "echo", "description": "Test echo command",
                    "parameters": {"message": {"type": "string", "description": "m", "position": 0}}},
                "git_status": {"command": "git", "baseArgs": ["status"], "description": "Git status"}
            }}"#,
        )
        .unwrap();

        let (code, out, err) = dry_run(&path);
        assert_eq!(code, 0);
        assert!(err.is_empty());
        let header = format!("Configuration loaded successfully from: {}", path.display());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                header.as_str(),
                "Found 2 command(s):",
                "  ✓ echo_test: Test echo command",
                "  ✓ git_status: Git status",
                "Dry-run completed successfully",
            ]
        );
    }

    #[test]
    fn test_lint_warnings_do_not_fail() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commands.json");
        fs::write(
            &path,
            r#"{"commands": {"x": {"command": "echo", "description": "d",
                "parameters": {"bare": {"type": "string", "description": "b"}}}}}"#,
        )
        .unwrap();

        let (code, out, _) = dry_run(&path);
        assert_eq!(code, 0);
        assert!(out.contains("Warnings:"));
        assert!(out.contains("! x: parameter 'bare' has neither 'position' nor 'argName'"));
    }

    #[test]
    fn test_invalid_commands_are_listed_on_stderr() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commands.json");
        fs::write(&path, r#"{"commands": {"invalid_cmd": {"command": "echo"}}}"#).unwrap();

        let (code, out, err) = dry_run(&path);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: Invalid command definitions"));
        assert!(err.contains("  ✗ invalid_cmd: missing or invalid 'description' field"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.json");

        let (code, _, err) = dry_run(&path);
        assert_eq!(code, 1);
        assert!(err.contains("Error: Configuration file not found"));
        assert!(err.contains(path.to_str().unwrap()));
    }
}
