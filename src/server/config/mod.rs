//! Load and validate server configuration.
use std::path::PathBuf;

use serde::Deserialize;
use tracing::error;

use crate::{cli::ConfigSource, lib::errors::ConfigError};

pub mod server;
pub mod telemetry;
pub mod tools;

pub use server::{
    parse_server_section, validate_port, RawServerSection, ServerSection, DEFAULT_HOST,
    DEFAULT_PORT, DEFAULT_SERVER_NAME,
};
pub use tools::{parse_tools_section, RawToolsSection, ToolsSection};

pub const CONFIG_ENV_KEY: &str = "MCP_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub tools: ToolsSection,
    pub source_path: PathBuf,
    /// False when built-in defaults were used because no file existed.
    pub from_file: bool,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    tools: Option<RawToolsSection>,
}

impl ServerConfig {
    /// Built-in defaults, attributed to `path`.
    pub fn defaults(path: PathBuf) -> Self {
        Self {
            server: ServerSection::default(),
            tools: ToolsSection::default(),
            source_path: path,
            from_file: false,
        }
    }

    /// Load from `path`; a missing file is only tolerated when nobody asked for it explicitly.
    pub fn load(path: PathBuf, source: ConfigSource) -> Result<Self, ConfigError> {
        telemetry::log_config_source(&path, source);
        if source == ConfigSource::Default && !path.exists() {
            telemetry::log_defaults(&path);
            let config = Self::defaults(path);
            telemetry::log_loaded(&config);
            return Ok(config);
        }
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "mcp_ui_server::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "mcp_ui_server::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "mcp_ui_server::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Replace the configured port with a validated CLI override.
    pub fn with_port_override(mut self, port: Option<u16>) -> Result<Self, ConfigError> {
        if let Some(port) = port {
            validate_port(port, &self.source_path)?;
            self.server.port = port;
        }
        Ok(self)
    }

    fn from_raw(raw: RawServerConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, &path)?;
        let tools = parse_tools_section(raw.tools, &path)?;

        Ok(Self {
            server,
            tools,
            source_path: path,
            from_file: true,
        })
    }
}
