//! `ServerHandler` that serves `tools/list` and `tools/call` from the tool registry.
use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer,
};
use serde_json::Value;
use tracing::debug;

use crate::{lib::telemetry::InvocationSpan, tools::ToolRegistry};

/// UI tools take no arguments.
fn no_arguments_schema() -> Arc<JsonObject> {
    let mut schema = JsonObject::new();
    schema.insert("type".into(), Value::String("object".into()));
    Arc::new(schema)
}

/// MCP server answering `tools/list` and `tools/call` from an injected registry.
#[derive(Clone)]
pub struct UiResourceServer {
    registry: Arc<ToolRegistry>,
    server_name: Arc<String>,
    instructions: Arc<String>,
    input_schema: Arc<JsonObject>,
}

impl UiResourceServer {
    pub fn new(registry: Arc<ToolRegistry>, server_name: String, instructions: String) -> Self {
        Self {
            registry,
            server_name: Arc::new(server_name),
            instructions: Arc::new(instructions),
            input_schema: no_arguments_schema(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Tool metadata advertised to hosts, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry
            .list()
            .map(|descriptor| {
                Tool::new(
                    descriptor.name().to_string(),
                    descriptor.description().to_string(),
                    self.input_schema.clone(),
                )
            })
            .collect()
    }

    /// Invoke a tool and embed its envelopes as MCP resources.
    pub fn dispatch(&self, name: &str) -> Result<CallToolResult, ErrorData> {
        let span = InvocationSpan::start(name);
        match self.registry.invoke(name) {
            Ok(envelopes) => {
                let contents: Vec<Content> = envelopes
                    .iter()
                    .map(|envelope| Content::resource(envelope.to_resource_contents()))
                    .collect();
                span.succeed(contents.len());
                Ok(CallToolResult::success(contents))
            }
            Err(err) => {
                let error = err.to_invocation_error_data(&span.invocation_id().to_string());
                span.fail(&err.to_string());
                Err(error)
            }
        }
    }
}

impl ServerHandler for UiResourceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: (*self.server_name).clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if let Some(arguments) = request.arguments.as_ref().filter(|args| !args.is_empty()) {
            debug!(
                target: "mcp_ui_server::tools",
                tool = %request.name,
                ignored = ?arguments.keys().collect::<Vec<_>>(),
                "Ignoring arguments passed to a no-argument tool"
            );
        }
        self.dispatch(&request.name)
    }
}
