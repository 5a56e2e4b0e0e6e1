use std::{net::Ipv4Addr, time::Duration};

use anyhow::{Context, Result};
use rmcp::{
    model::{CallToolRequestParam, ClientInfo},
    serve_client,
    service::RunningService,
    transport::StreamableHttpClientTransport,
    RoleClient,
};
use serde_json::{json, Value};
use tokio::{net::TcpStream, time::timeout};

use crate::common::spawn_network_server;

const DEMO_TOOLS: [&str; 4] = [
    "greet",
    "show_dashboard",
    "show_external_site",
    "show_interactive_demo",
];

/// List the catalog and render the greeting over one client session.
async fn list_and_greet(client: RunningService<RoleClient, ClientInfo>) -> Result<Value> {
    let list = client.list_tools(None).await?;
    let names: Vec<&str> = list.tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert_eq!(names, DEMO_TOOLS);

    let result = client
        .call_tool(CallToolRequestParam {
            name: "greet".into(),
            arguments: None,
        })
        .await?;
    let value = serde_json::to_value(&result)?;
    let resource = value["content"][0]["resource"].clone();
    assert_eq!(resource["uri"], json!("ui://greeting/simple"));
    assert_eq!(resource["mimeType"], json!("text/html"));

    client.cancel().await?;
    Ok(resource)
}

async fn http_client(port: u16) -> Result<RunningService<RoleClient, ClientInfo>> {
    let transport =
        StreamableHttpClientTransport::from_uri(format!("http://127.0.0.1:{port}/mcp"));
    Ok(serve_client(ClientInfo::default(), transport).await?)
}

async fn tcp_client(port: u16) -> Result<RunningService<RoleClient, ClientInfo>> {
    let stream = TcpStream::connect((Ipv4Addr::LOCALHOST, port))
        .await
        .context("tcp connect")?;
    Ok(serve_client(ClientInfo::default(), stream).await?)
}

#[tokio::test]
async fn http_transport_serves_concurrent_sessions() -> Result<()> {
    let (process, port) = spawn_network_server("http").await?;

    let sessions = async {
        let (first, second) = tokio::try_join!(http_client(port), http_client(port))?;
        tokio::try_join!(list_and_greet(first), list_and_greet(second))
    };
    let outcome = timeout(Duration::from_secs(20), sessions).await;
    let stderr = process.shutdown().await?;

    let (first, second) = outcome
        .context("http sessions timed out")?
        .with_context(|| format!("http sessions failed; server stderr:\n{stderr}"))?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn tcp_transport_serves_each_connection_independently() -> Result<()> {
    let (process, port) = spawn_network_server("tcp").await?;

    let sessions = async {
        let (first, second) = tokio::try_join!(tcp_client(port), tcp_client(port))?;
        tokio::try_join!(list_and_greet(first), list_and_greet(second))
    };
    let outcome = timeout(Duration::from_secs(20), sessions).await;
    let stderr = process.shutdown().await?;

    let (first, second) = outcome
        .context("tcp sessions timed out")?
        .with_context(|| format!("tcp sessions failed; server stderr:\n{stderr}"))?;
    assert_eq!(first, second);
    Ok(())
}
