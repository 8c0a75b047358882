//! write-file tool - write content to a file

use async_trait::async_trait;
use eyre::eyre;
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &'static str {
        "write-file"
    }

    fn description(&self) -> &'static str {
        "Write content to a file, creating parent directories if needed."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("filePath", ParamType::String).describe("Path of the file to write"),
            ParamSpec::required("content", ParamType::String).describe("Content to write"),
        ])
    }

    async fn execute(&self, args: &Value, ctx: &ToolContext) -> Result<String, eyre::Error> {
        let file_path = args["filePath"]
            .as_str()
            .ok_or_else(|| eyre!("filePath is required"))?;
        let content = args["content"]
            .as_str()
            .ok_or_else(|| eyre!("content is required"))?;

        let resolved = ctx.resolve_path(file_path)?;
        if let Some(parent) = resolved.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("failed to create directories for '{}': {}", file_path, e))?;
        }

        tokio::fs::write(&resolved, content)
            .await
            .map_err(|e| eyre!("failed to write file '{}': {}", file_path, e))?;

        Ok(format!("Wrote {} bytes to {}", content.len(), file_path))
    }
}
