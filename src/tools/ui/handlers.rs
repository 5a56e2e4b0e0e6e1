//! Content providers for the demo UI tools. Payloads are opaque to the core.
use crate::tools::{
    envelope::{build, ContentVariant, Encoding},
    registry::ToolResult,
};

pub const GREETING_URI: &str = "ui://greeting/simple";
pub const DASHBOARD_URI: &str = "ui://dashboard/main";
pub const EXTERNAL_SITE_URI: &str = "ui://external/example";
pub const INTERACTIVE_DEMO_URI: &str = "ui://demo/interactive";

pub const EXTERNAL_SITE_URL: &str = "https://example.com";

const GREETING_HTML: &str = include_str!("assets/greeting.html");
const DASHBOARD_HTML: &str = include_str!("assets/dashboard.html");
const INTERACTIVE_DEMO_HTML: &str = include_str!("assets/interactive_demo.html");

pub fn greet() -> ToolResult {
    Ok(vec![build(
        GREETING_URI,
        ContentVariant::raw_html(GREETING_HTML),
        Encoding::Text,
    )?])
}

pub fn show_dashboard() -> ToolResult {
    Ok(vec![build(
        DASHBOARD_URI,
        ContentVariant::raw_html(DASHBOARD_HTML),
        Encoding::Text,
    )?])
}

pub fn show_external_site() -> ToolResult {
    Ok(vec![build(
        EXTERNAL_SITE_URI,
        ContentVariant::external_url(EXTERNAL_SITE_URL),
        Encoding::Text,
    )?])
}

/// Buttons post `intent` and `tool` messages to the parent frame.
pub fn show_interactive_demo() -> ToolResult {
    Ok(vec![build(
        INTERACTIVE_DEMO_URI,
        ContentVariant::raw_html(INTERACTIVE_DEMO_HTML),
        Encoding::Text,
    )?])
}
