//! Entry point for the MCP UI server.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use mcp_ui_server::{
    cli::{execute_cli_command, CliCommand, LaunchProfile, LaunchProfileArgs, ParsedCommand},
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
    },
    tools,
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchProfileArgs::parse();
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::RunServer(profile) => run_server(profile).await,
        ParsedCommand::Cli { command, profile } => handle_cli_command(command, profile),
    }
}

fn load_config(profile: &LaunchProfile) -> Result<ServerConfig, RuntimeExit> {
    ServerConfig::load(profile.config_path.clone(), profile.config_source)
        .and_then(|config| config.with_port_override(profile.port_override))
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))
}

async fn run_server(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = load_config(&profile)?;
    runtime::run_server(profile, config).await
}

fn handle_cli_command(command: CliCommand, profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = load_config(&profile)?;
    let registry = tools::build_registry(&config.tools.disabled)
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;
    let message = execute_cli_command(command, &registry).map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}
