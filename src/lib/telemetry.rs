//! Telemetry initialization and tool invocation span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and outcome of one `tools/call`.
pub struct InvocationSpan {
    span: Span,
    started_at: Instant,
    invocation_id: Uuid,
    tool: String,
}

impl InvocationSpan {
    pub fn start(tool: &str) -> Self {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            target: "mcp_ui_server::tools",
            "tool_invocation",
            %invocation_id,
            tool
        );
        Self {
            span,
            started_at: Instant::now(),
            invocation_id,
            tool: tool.to_string(),
        }
    }

    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    pub fn succeed(self, envelope_count: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "mcp_ui_server::tools",
            invocation_id = %self.invocation_id,
            tool = %self.tool,
            status = "ok",
            envelope_count,
            elapsed_ms,
            "Completed tool call"
        );
    }

    pub fn fail(self, reason: &str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        warn!(
            target: "mcp_ui_server::tools",
            invocation_id = %self.invocation_id,
            tool = %self.tool,
            status = "error",
            reason,
            elapsed_ms,
            "Tool call failed"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_path: &'a str,
    pub registered_tools: &'a [&'a str],
    pub instructions: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "mcp_ui_server::runtime",
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_path = telemetry.config_path,
        registered_tools = ?telemetry.registered_tools,
        instructions = telemetry.instructions,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}
