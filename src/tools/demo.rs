//! Example tool surface: the `add` tool and the greeting resource.

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceTemplate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// URI scheme of the greeting resource template.
pub const GREETING_URI_PREFIX: &str = "greeting://";

/// Input for the `add` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddRequest {
    pub a: i64,
    pub b: i64,
}

/// Add two numbers.
pub fn add(a: i64, b: i64) -> i64 {
    a + b
}

/// Format the personalized greeting.
pub fn greeting_message(name: &str) -> String {
    format!("Hello, {name}!")
}

/// The `greeting://{name}` resource template advertised to MCP clients.
pub fn greeting_template() -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: format!("{GREETING_URI_PREFIX}{{name}}"),
        name: "get_greeting".to_string(),
        title: None,
        description: Some("Get a personalized greeting".to_string()),
        mime_type: Some("text/plain".to_string()),
    }
    .no_annotation()
}

/// Resolve a `greeting://{name}` URI to its greeting text. Returns `None`
/// for URIs outside the scheme or with an empty name.
pub fn read_greeting(uri: &str) -> Option<String> {
    uri.strip_prefix(GREETING_URI_PREFIX)
        .filter(|name| !name.is_empty())
        .map(greeting_message)
}
