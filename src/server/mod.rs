//! Server configuration and MCP runtime.

pub mod config;
pub mod runtime;
