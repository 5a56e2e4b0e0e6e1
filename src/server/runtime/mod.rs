//! MCP server startup and tool dispatch.
mod dispatcher;
mod server_info;
mod startup;

pub use dispatcher::UiResourceServer;
pub use server_info::build_instructions;
pub use startup::{build_server, run_server, RuntimeExit, HTTP_ENDPOINT_PATH};
