use std::path::Path;

use serde::Deserialize;

use crate::{lib::errors::ConfigError, tools::ui};

/// Which demo tools are registered at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolsSection {
    pub disabled: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawToolsSection {
    pub disabled: Option<Vec<String>>,
}

pub fn parse_tools_section(
    raw: Option<RawToolsSection>,
    path: &Path,
) -> Result<ToolsSection, ConfigError> {
    let disabled = raw.unwrap_or_default().disabled.unwrap_or_default();
    if let Some(unknown) = disabled.iter().find(|name| !ui::is_known_tool(name)) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "tools.disabled",
            message: format!("`{unknown}` is not a known tool"),
        });
    }
    Ok(ToolsSection { disabled })
}
