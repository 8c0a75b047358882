//! Tool system - definitions, registry, dispatch, and the built-in tools
//!
//! A tool is a named server-side capability with a declared parameter schema.
//! The dispatcher validates incoming arguments against that schema, runs the
//! executor, and wraps the result (or any failure) into the response envelope
//! defined here. Failures are data, not protocol faults: they travel in the
//! same envelope a successful result would.

mod calculate;
mod context;
mod dispatcher;
mod echo;
mod fetch_url;
mod json_format;
mod list_directory;
mod read_file;
mod registry;
pub mod schema;
mod system_info;
mod text_stats;
mod write_file;

pub use context::ToolContext;
pub use dispatcher::Dispatcher;
pub use registry::ToolRegistry;
pub use schema::{ParamSpec, ParamType, ParameterSchema, SchemaViolation};

pub use calculate::CalculateTool;
pub use echo::EchoTool;
pub use fetch_url::FetchUrlTool;
pub use json_format::JsonFormatTool;
pub use list_directory::ListDirectoryTool;
pub use read_file::ReadFileTool;
pub use system_info::SystemInfoTool;
pub use text_stats::TextStatsTool;
pub use write_file::WriteFileTool;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named server-side capability invocable with structured arguments
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the name callers use in tools/call)
    fn name(&self) -> &'static str;

    /// Human-readable description, display-only
    fn description(&self) -> &'static str;

    /// Declared parameter contract, validated before execution
    fn schema(&self) -> ParameterSchema;

    /// Execute with already-validated arguments. Must not mutate the registry.
    async fn execute(&self, args: &Value, ctx: &ToolContext) -> Result<String, eyre::Error>;
}

/// A unit of response payload. Only text is produced today; the tagged
/// representation leaves room for other kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The text payload of this block
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Response envelope returned for every invocation, success or failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// Ordered content blocks
    pub content: Vec<ContentBlock>,
    /// Failure marker. Failure outcomes still use this same envelope;
    /// the flag only lets callers style them differently.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl InvocationResponse {
    /// Successful response with a single text block
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: false,
        }
    }

    /// Failure outcome carrying a diagnostic as ordinary content
    pub fn failure(diagnostic: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(diagnostic)],
            is_error: true,
        }
    }

    /// Concatenated text of all content blocks
    pub fn text(&self) -> String {
        self.content.iter().map(ContentBlock::as_text).collect::<Vec<_>>().join("\n")
    }
}

/// Tool metadata exposed by the enumeration entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
