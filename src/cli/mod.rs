//! CLI entrypoint module structure.
use anyhow::Result;
use serde_json::{json, Value};

use crate::tools::ToolRegistry;

pub mod args;
pub mod profile;

pub use args::{
    CliCommand, LaunchProfileArgs, ParsedCommand, ToolsArgs, ToolsCallArgs, ToolsCommand,
};
pub use profile::{
    build_launch_args, resolve_config_path, ConfigSource, LaunchProfile, TransportMode,
};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand, registry: &ToolRegistry) -> Result<String> {
    let payload = match command {
        CliCommand::Tools(tools) => match tools.command {
            ToolsCommand::List => list_tools(registry),
            ToolsCommand::Call(args) => call_tool(registry, &args.tool_name)?,
        },
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn list_tools(registry: &ToolRegistry) -> Value {
    registry
        .list()
        .map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description(),
            })
        })
        .collect()
}

fn call_tool(registry: &ToolRegistry, name: &str) -> Result<Value> {
    let envelopes = registry.invoke(name)?;
    let resources: Vec<Value> = envelopes.iter().map(|envelope| envelope.to_json()).collect();
    Ok(json!({ "tool": name, "resources": resources }))
}
