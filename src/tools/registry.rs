//! Tool registry - name to definition mapping with stable enumeration order
//!
//! Built once at startup and shared read-only with the dispatcher and the
//! intent router. Registration is last-write-wins: re-registering a name
//! replaces the definition but keeps its original enumeration position, so
//! tool listings stay stable across replacement.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Tool, ToolDefinition};

/// Registry of tool definitions, ordered by first registration
pub struct ToolRegistry {
    order: Vec<String>,
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            tools: HashMap::new(),
        }
    }

    /// Registry with the nine standard tools, in their canonical order
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::EchoTool));
        registry.register(Arc::new(super::CalculateTool));
        registry.register(Arc::new(super::JsonFormatTool));
        registry.register(Arc::new(super::TextStatsTool));
        registry.register(Arc::new(super::SystemInfoTool));
        registry.register(Arc::new(super::ReadFileTool));
        registry.register(Arc::new(super::WriteFileTool));
        registry.register(Arc::new(super::ListDirectoryTool));
        registry.register(Arc::new(super::FetchUrlTool));
        registry
    }

    /// Add or replace a tool by name (last-write-wins)
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All tools in registration order
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name).cloned())
            .collect()
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Ordered definitions for the enumeration entry point
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list()
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.schema().to_json_schema(),
            })
            .collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
