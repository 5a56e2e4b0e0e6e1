use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use rmcp::{
    transport::{
        streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
        StreamableHttpService,
    },
    ServiceExt,
};
use tokio::net::TcpListener;

use crate::{
    cli::{LaunchProfile, TransportMode},
    lib::{
        errors::REGISTRY_INIT_FAILED_EXIT_CODE,
        telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    },
    server::{
        config::ServerConfig,
        runtime::{build_instructions, UiResourceServer},
    },
    tools,
};

/// Path the streamable HTTP transport is mounted on.
pub const HTTP_ENDPOINT_PATH: &str = "/mcp";

/// Bundles a runtime error message with an exit code and optional structured error data.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
    error_data: Option<rmcp::model::ErrorData>,
}

impl RuntimeExit {
    pub fn structured(error: rmcp::model::ErrorData, exit_code: ExitCode) -> Self {
        Self {
            message: error.message.to_string(),
            exit_code,
            error_data: Some(error),
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
            error_data: None,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(data) = self.error_data {
            if let Ok(serialized) = serde_json::to_string(&data) {
                eprintln!("{serialized}");
            } else {
                eprintln!("{}", data.message);
            }
        } else {
            eprintln!("{}", self.message);
        }
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn error_data(&self) -> Option<&rmcp::model::ErrorData> {
        self.error_data.as_ref()
    }
}

/// Register the enabled tools and wrap them in the MCP handler.
pub fn build_server(
    profile: &LaunchProfile,
    config: &ServerConfig,
) -> Result<UiResourceServer, RuntimeExit> {
    let registry = tools::build_registry(&config.tools.disabled).map_err(|err| {
        RuntimeExit::structured(
            err.to_error_data(),
            ExitCode::from(REGISTRY_INIT_FAILED_EXIT_CODE),
        )
    })?;
    let instructions = build_instructions(profile, config, &registry);
    Ok(UiResourceServer::new(
        Arc::new(registry),
        config.server.name.clone(),
        instructions,
    ))
}

/// Start the MCP server and select stdio/HTTP/TCP based on the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let server = build_server(&profile, &config)?;
    let tool_names: Vec<&str> = server.registry().list().map(|tool| tool.name()).collect();
    let instructions = server.instructions();

    emit_runtime_mode(&RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host: Some(config.server.host.as_str()),
        port: Some(config.server.port),
        config_path: config.source_path.to_string_lossy().as_ref(),
        registered_tools: &tool_names,
        instructions,
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Http => run_http(server, &config).await,
        TransportMode::Tcp => run_tcp(server, &config).await,
    }
}

async fn run_stdio(server: UiResourceServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_http(server: UiResourceServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let service: StreamableHttpService<UiResourceServer, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(server.clone()),
            Default::default(),
            StreamableHttpServerConfig::default(),
        );
    let router = axum::Router::new().nest_service(HTTP_ENDPOINT_PATH, service);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind HTTP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "mcp_ui_server::runtime",
        transport = "http",
        bind_addr = %addr,
        endpoint = HTTP_ENDPOINT_PATH,
        "Started listening in streamable HTTP mode"
    );

    axum::serve(listener, router)
        .await
        .with_context(|| format!("HTTP server on {addr} stopped"))
        .map_err(RuntimeExit::from_error)
}

async fn run_tcp(server: UiResourceServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "mcp_ui_server::runtime",
        transport = "tcp",
        bind_addr = %addr,
        "Started listening in TCP mode"
    );

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .with_context(|| format!("failed to accept TCP connection ({addr})"))
            .map_err(RuntimeExit::from_error)?;
        tracing::info!(
            target: "mcp_ui_server::runtime",
            peer = %peer,
            "Accepted connection from MCP client"
        );
        let connection = server.clone();
        tokio::spawn(async move {
            let running = match connection.serve(stream).await {
                Ok(running) => running,
                Err(err) => {
                    tracing::warn!(
                        target: "mcp_ui_server::runtime",
                        peer = %peer,
                        error = %err,
                        "MCP handshake failed"
                    );
                    return;
                }
            };
            if let Err(err) = running.waiting().await {
                tracing::warn!(
                    target: "mcp_ui_server::runtime",
                    peer = %peer,
                    error = %err,
                    "MCP session ended abnormally"
                );
            }
        });
    }
}
