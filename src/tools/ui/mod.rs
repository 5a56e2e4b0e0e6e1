//! Demo UI tools and their startup registration.

pub mod handlers;

use tracing::info;

use crate::{
    lib::errors::RegistryError,
    tools::registry::{ToolRegistry, ToolResult},
};

/// Static catalog entry for a demo tool.
#[derive(Debug, Clone, Copy)]
pub struct UiTool {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: fn() -> ToolResult,
}

/// Demo tools in the order they are advertised.
pub const UI_TOOLS: [UiTool; 4] = [
    UiTool {
        name: "greet",
        description: "A simple greeting tool that returns a UI resource.",
        handler: handlers::greet,
    },
    UiTool {
        name: "show_dashboard",
        description: "Display a sample dashboard with metrics.",
        handler: handlers::show_dashboard,
    },
    UiTool {
        name: "show_external_site",
        description: "Display an external website in an iframe.",
        handler: handlers::show_external_site,
    },
    UiTool {
        name: "show_interactive_demo",
        description: "Show an interactive demo with buttons that send intents and tool calls.",
        handler: handlers::show_interactive_demo,
    },
];

pub fn is_known_tool(name: &str) -> bool {
    UI_TOOLS.iter().any(|tool| tool.name == name)
}

/// Register every demo tool not listed in `disabled`. Returns how many were registered.
pub fn register_all(
    registry: &mut ToolRegistry,
    disabled: &[String],
) -> Result<usize, RegistryError> {
    let mut registered = 0;
    for tool in UI_TOOLS {
        if disabled.iter().any(|name| name == tool.name) {
            info!(
                target: "mcp_ui_server::tools",
                tool = tool.name,
                "Skipping tool disabled in configuration"
            );
            continue;
        }
        registry.register(tool.name, tool.description, tool.handler)?;
        registered += 1;
    }
    Ok(registered)
}

/// Build a registry holding the enabled demo tools.
pub fn build_registry(disabled: &[String]) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, disabled)?;
    Ok(registry)
}
