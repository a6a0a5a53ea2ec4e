// Tool trait and registry for the MCP server

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;

use crate::protocol::{CallToolResult, ToolDescriptor};

/// An MCP tool: a named operation taking JSON arguments and returning text.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool descriptor advertised via `tools/list`.
    fn descriptor(&self) -> ToolDescriptor;

    /// Execute the tool with the given arguments.
    ///
    /// Domain failures are reported as an error-flagged [`CallToolResult`];
    /// an `Err` here becomes a JSON-RPC internal error.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Registry of available tools, keyed by name.
///
/// A `BTreeMap` keeps `tools/list` output in a stable order.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool under the name in its descriptor.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let descriptor = tool.descriptor();
        self.tools.insert(descriptor.name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Descriptors of all registered tools.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helpers for building tool input schemas

pub fn object_schema(properties: serde_json::Value, required: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn string_schema(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}
