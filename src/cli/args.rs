//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli {
        command: CliCommand,
        profile: LaunchProfile,
    },
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Inspect the tool catalog without starting a transport.
    #[command(about = "Inspect the registered UI tools (list/call)")]
    Tools(ToolsArgs),
}

/// `tools` command container.
#[derive(Debug, Clone, Args)]
#[command(
    about = "Inspect the registered UI tools",
    long_about = "Inspect the registered UI tools.\n\nSubcommands:\n  list  Print every registered tool with its description.\n  call  Invoke a tool and print the resource envelopes it returns.",
    after_help = "Hint: tools disabled under [tools] in config.toml are not listed."
)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsCommand,
}

/// Tool inspection subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ToolsCommand {
    /// Print the registry catalog as JSON.
    List,
    /// Invoke a tool and print its envelopes as JSON.
    Call(ToolsCallArgs),
}

/// Arguments for `tools call`.
#[derive(Debug, Clone, Args)]
pub struct ToolsCallArgs {
    /// Registered tool name (see `tools list`).
    pub tool_name: String,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "MCP UI Server (inline HTML and external URL resources for MCP-UI hosts)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select stdio (default), http (streamable HTTP at /mcp) or tcp.
    #[arg(long, value_enum, default_value_t = TransportMode::Stdio)]
    pub transport: TransportMode,
    /// Path to config.toml (overrides MCP_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Listening port for http/tcp (overrides [server].port).
    #[arg(long = "port", value_parser = clap::value_parser!(u16).range(1024..))]
    pub port_override: Option<u16>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(&self) -> Result<LaunchProfile> {
        let (config_path, config_source) = resolve_config_path(self.config_override.clone())?;
        let launch_args = build_launch_args(self.transport, &config_path, self.port_override);

        Ok(LaunchProfile {
            config_path,
            config_source,
            transport: self.transport,
            port_override: self.port_override,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        let profile = self.build()?;
        match self.command {
            Some(command) => Ok(ParsedCommand::Cli { command, profile }),
            None => Ok(ParsedCommand::RunServer(profile)),
        }
    }
}
