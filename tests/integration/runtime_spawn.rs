use std::process::Command as StdCommand;

use anyhow::Result;
use rmcp::{model::ClientInfo, serve_client};
use serde_json::Value;

use crate::common::{fixture, spawn_stdio_server, BINARY_PATH, VALID_CONFIG};

#[tokio::test]
async fn inspector_style_spawn_lists_tools() -> Result<()> {
    let (process, transport) = spawn_stdio_server(VALID_CONFIG)?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    let names: Vec<&str> = list.tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert_eq!(
        names,
        vec![
            "greet",
            "show_dashboard",
            "show_external_site",
            "show_interactive_demo"
        ],
        "list_tools should advertise every demo tool in order: {:?}",
        list.tools
    );

    client.cancel().await?;
    let (status, stderr) = process.finish().await?;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}: {stderr}"
    );
    Ok(())
}

#[tokio::test]
async fn disabled_tools_are_not_advertised() -> Result<()> {
    let (process, transport) = spawn_stdio_server("tests/fixtures/config_disabled_tools.toml")?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    assert!(
        list.tools
            .iter()
            .all(|tool| tool.name.as_ref() != "show_dashboard"),
        "show_dashboard is disabled: {:?}",
        list.tools
    );
    assert_eq!(list.tools.len(), 3);

    client.cancel().await?;
    let (status, stderr) = process.finish().await?;
    assert!(status.success(), "expected clean server shutdown: {stderr}");
    Ok(())
}

#[test]
fn tools_list_command_prints_catalog() -> Result<()> {
    let output = StdCommand::new(BINARY_PATH)
        .arg("--config")
        .arg(fixture(VALID_CONFIG))
        .args(["tools", "list"])
        .output()?;
    assert!(output.status.success(), "tools list failed: {output:?}");

    let payload: Value = serde_json::from_slice(&output.stdout)?;
    let tools = payload.as_array().cloned().unwrap_or_default();
    assert_eq!(tools.len(), 4);
    assert_eq!(tools[0]["name"], "greet");
    Ok(())
}

#[test]
fn invalid_config_exits_with_failure() {
    let status = StdCommand::new(BINARY_PATH)
        .arg("--config")
        .arg(fixture("tests/fixtures/config_invalid_port.toml"))
        .args(["tools", "list"])
        .status()
        .expect("process should start");
    assert_eq!(
        status.code(),
        Some(1),
        "configuration errors exit with code 1, got {status:?}"
    );
}
