mod dispatch;
mod dry_run;
mod server;

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use cli_mcp_mapper_config::{CONFIG_ENV_VAR, MapperConfig, resolve_config_path};
use tracing_subscriber::EnvFilter;

use crate::server::MapperServer;

#[derive(Debug, Parser)]
#[command(name = "cli-mcp-mapper")]
#[command(version)]
#[command(about = "Expose configured shell commands as MCP tools over stdio")]
struct Cli {
    /// Path to the command configuration file (JSON, or YAML by extension).
    #[arg(long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
    /// Load and validate the configuration, then exit without serving.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if cli.dry_run {
        let code = dry_run::run(
            cli.config.as_deref(),
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )
        .unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            1
        });
        std::process::exit(code);
    }

    if let Err(err) = run_server(cli.config.as_deref()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries protocol messages.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn run_server(config: Option<&Path>) -> Result<(), String> {
    let path = resolve_config_path(config).map_err(|e| e.to_string())?;
    let catalog = MapperConfig::load(&path)
        .map_err(|e| e.to_string())?
        .into_catalog();

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime
        .block_on(MapperServer::new(catalog).serve_stdio())
        .map_err(|e| e.to_string())
}
