//! Tool catalog, UI resource envelopes, and the demo UI tools.

pub mod envelope;
pub mod registry;
pub mod ui;

pub use envelope::{build, ContentVariant, Encoding, ResourceEnvelope};
pub use registry::{ToolDescriptor, ToolHandler, ToolRegistry, ToolResult};
pub use ui::{build_registry, register_all, UiTool, UI_TOOLS};
