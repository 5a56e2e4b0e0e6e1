use std::path::Path;

use tracing::{debug, info};

use super::{ServerConfig, DEFAULT_CONFIG_PATH};
use crate::cli::ConfigSource;

pub fn log_config_source(path: &Path, source: ConfigSource) {
    match source {
        ConfigSource::Cli => info!(
            target: "mcp_ui_server::config",
            path = %path.display(),
            "Loading configuration passed via --config"
        ),
        ConfigSource::Env => info!(
            target: "mcp_ui_server::config",
            path = %path.display(),
            "Loading configuration using MCP_CONFIG_PATH environment variable"
        ),
        ConfigSource::Default => debug!(
            target: "mcp_ui_server::config",
            path = %path.display(),
            default = DEFAULT_CONFIG_PATH,
            "No configuration path given; trying default config.toml"
        ),
    }
}

pub fn log_defaults(path: &Path) {
    info!(
        target: "mcp_ui_server::config",
        path = %path.display(),
        "Default config.toml not found; using built-in defaults"
    );
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "mcp_ui_server::config",
        path = %config.source_path.display(),
        from_file = config.from_file,
        name = %config.server.name,
        host = %config.server.host,
        port = config.server.port,
        disabled_tools = ?config.tools.disabled,
        "Configuration loaded successfully"
    );
}
