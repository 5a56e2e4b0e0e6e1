use std::path::PathBuf;

use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, CallToolResult, ClientInfo},
    serve_client,
    service::{RunningService, ServiceError},
    RoleClient, ServiceExt,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use mcp_ui_server::{
    cli::{build_launch_args, ConfigSource, LaunchProfile, TransportMode},
    server::{config::ServerConfig, runtime},
};

fn test_profile() -> LaunchProfile {
    let config_path = PathBuf::from("tests/fixtures/config_valid.toml");
    LaunchProfile {
        launch_args: build_launch_args(TransportMode::Stdio, &config_path, None),
        config_path,
        config_source: ConfigSource::Cli,
        transport: TransportMode::Stdio,
        port_override: None,
    }
}

async fn connect(
    config: ServerConfig,
) -> Result<(RunningService<RoleClient, ClientInfo>, JoinHandle<Result<()>>)> {
    let server = runtime::build_server(&test_profile(), &config)
        .map_err(|exit| anyhow::anyhow!("server build failed: {exit:?}"))?;
    let (server_transport, client_transport) = tokio::io::duplex(16 * 1024);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;
    Ok((client, server_task))
}

fn call(name: &str) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.to_string().into(),
        arguments: None,
    }
}

fn first_resource(result: &CallToolResult) -> Result<Value> {
    let value = serde_json::to_value(result)?;
    assert_eq!(value["content"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["content"][0]["type"], json!("resource"));
    Ok(value["content"][0]["resource"].clone())
}

#[tokio::test]
async fn greet_returns_identical_resource_on_every_call() -> Result<()> {
    let config = ServerConfig::defaults(PathBuf::from("config.toml"));
    let (client, server_task) = connect(config).await?;

    let first = client.call_tool(call("greet")).await?;
    let second = client.call_tool(call("greet")).await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let first = first_resource(&first)?;
    let second = first_resource(&second)?;
    assert_eq!(first["uri"], json!("ui://greeting/simple"));
    assert_eq!(first["mimeType"], json!("text/html"));
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn external_site_returns_uri_list_resource() -> Result<()> {
    let config = ServerConfig::defaults(PathBuf::from("config.toml"));
    let (client, server_task) = connect(config).await?;

    let response = client.call_tool(call("show_external_site")).await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let resource = first_resource(&response)?;
    assert_eq!(resource["uri"], json!("ui://external/example"));
    assert_eq!(resource["mimeType"], json!("text/uri-list"));
    assert_eq!(resource["text"], json!("https://example.com"));
    Ok(())
}

#[tokio::test]
async fn unknown_tool_is_reported_as_mcp_error() -> Result<()> {
    let config = ServerConfig::defaults(PathBuf::from("config.toml"));
    let (client, server_task) = connect(config).await?;

    let call_result = client.call_tool(call("show_weather")).await;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let error = call_result.expect_err("unknown tool should error");
    let error_data = match error {
        ServiceError::McpError(inner) => serde_json::to_value(inner)?,
        other => anyhow::bail!("unexpected error: {other:?}"),
    };
    assert_eq!(error_data["data"]["code"], json!("TOOL_NOT_FOUND"));
    assert_eq!(error_data["data"]["details"]["tool"], json!("show_weather"));
    Ok(())
}

#[tokio::test]
async fn disabled_tool_cannot_be_called() -> Result<()> {
    let mut config = ServerConfig::defaults(PathBuf::from("config.toml"));
    config.tools.disabled = vec!["show_interactive_demo".into()];
    let (client, server_task) = connect(config).await?;

    let list = client.list_tools(None).await?;
    let call_result = client.call_tool(call("show_interactive_demo")).await;
    let _ = client.cancel().await;
    let _ = server_task.await;

    assert_eq!(list.tools.len(), 3);
    assert!(call_result.is_err(), "disabled tool must not be callable");
    Ok(())
}

#[tokio::test]
async fn server_info_carries_configured_name() -> Result<()> {
    let mut config = ServerConfig::defaults(PathBuf::from("config.toml"));
    config.server.name = "mcp-ui-python-server".into();
    let (client, server_task) = connect(config).await?;

    let info = client.peer_info().cloned();
    let _ = client.cancel().await;
    let _ = server_task.await;

    let info = serde_json::to_value(info.expect("server info after handshake"))?;
    assert_eq!(info["serverInfo"]["name"], json!("mcp-ui-python-server"));
    assert!(info["instructions"]
        .as_str()
        .is_some_and(|text| text.contains("show_external_site")));
    Ok(())
}
