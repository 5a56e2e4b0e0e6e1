//! Process-scoped tool catalog.
//!
//! Built once at startup through explicit `register` calls, then shared
//! read-only (behind `Arc`) with the dispatcher.

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::debug;

use crate::{
    lib::errors::{EnvelopeError, RegistryError},
    tools::envelope::ResourceEnvelope,
};

const MAX_TOOL_NAME_LENGTH: usize = 128;

/// Result every tool handler produces.
pub type ToolResult = Result<Vec<ResourceEnvelope>, EnvelopeError>;

/// Shared, stateless tool callable.
pub type ToolHandler = Arc<dyn Fn() -> ToolResult + Send + Sync>;

/// Registered tool: name, description, and handler.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    handler: ToolHandler,
}

impl ToolDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn handler(&self) -> &ToolHandler {
        &self.handler
    }

    /// Run the handler as-is.
    pub fn call(&self) -> ToolResult {
        (self.handler)()
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Name-keyed tool catalog preserving registration order.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure or function as a tool.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<&ToolDescriptor, RegistryError>
    where
        F: Fn() -> ToolResult + Send + Sync + 'static,
    {
        self.register_handler(name, description, Arc::new(handler))
    }

    /// Register an already shared handler. The handler is not invoked.
    pub fn register_handler(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: ToolHandler,
    ) -> Result<&ToolDescriptor, RegistryError> {
        let name = name.into();
        validate_tool_name(&name)?;
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName { name });
        }

        let position = self.tools.len();
        self.index.insert(name.clone(), position);
        self.tools.push(ToolDescriptor {
            name,
            description: description.into(),
            handler,
        });
        let descriptor = &self.tools[position];
        debug!(
            target: "mcp_ui_server::tools",
            tool = descriptor.name(),
            position,
            "Registered tool"
        );
        Ok(descriptor)
    }

    pub fn lookup(&self, name: &str) -> Result<&ToolDescriptor, RegistryError> {
        self.index
            .get(name)
            .map(|&position| &self.tools[position])
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Descriptors in registration order. Call again to restart.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &ToolDescriptor> + Clone + '_ {
        self.tools.iter()
    }

    /// Look up and run a tool, enforcing that it returns at least one envelope.
    pub fn invoke(&self, name: &str) -> Result<Vec<ResourceEnvelope>, RegistryError> {
        let descriptor = self.lookup(name)?;
        let envelopes = descriptor
            .call()
            .map_err(|source| RegistryError::InvalidEnvelope {
                name: name.to_string(),
                source,
            })?;
        if envelopes.is_empty() {
            return Err(RegistryError::InvalidEnvelope {
                name: name.to_string(),
                source: EnvelopeError::EmptyResult,
            });
        }
        Ok(envelopes)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn validate_tool_name(name: &str) -> Result<(), RegistryError> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name.len() > MAX_TOOL_NAME_LENGTH {
        Some("name must be at most 128 characters")
    } else if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        Some("only ASCII letters, digits, `_`, `-` and `.` are allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RegistryError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
