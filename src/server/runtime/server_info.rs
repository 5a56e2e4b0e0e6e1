use crate::{cli::LaunchProfile, server::config::ServerConfig, tools::ToolRegistry};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(
    profile: &LaunchProfile,
    config: &ServerConfig,
    registry: &ToolRegistry,
) -> String {
    let tools: Vec<&str> = registry.list().map(|tool| tool.name()).collect();
    format!(
        "{name} serves MCP-UI resources in {transport} mode (host={host}, port={port}). Tools: {tools}. Each call returns embedded ui:// resources (text/html or text/uri-list) for the host to render.",
        name = config.server.name,
        transport = profile.transport.as_str(),
        host = config.server.host,
        port = config.server.port,
        tools = tools.join(", ")
    )
}
