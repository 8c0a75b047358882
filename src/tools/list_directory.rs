//! list-directory tool - newline-joined directory entries

use async_trait::async_trait;
use eyre::eyre;
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct ListDirectoryTool;

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &'static str {
        "list-directory"
    }

    fn description(&self) -> &'static str {
        "List the entries of a directory, one per line."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("dirPath", ParamType::String).describe("Path of the directory to list"),
        ])
    }

    async fn execute(&self, args: &Value, ctx: &ToolContext) -> Result<String, eyre::Error> {
        let dir_path = args["dirPath"]
            .as_str()
            .ok_or_else(|| eyre!("dirPath is required"))?;

        let resolved = ctx.resolve_path(dir_path)?;
        let mut reader = tokio::fs::read_dir(&resolved)
            .await
            .map_err(|e| eyre!("failed to read directory '{}': {}", dir_path, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| eyre!("failed to read directory '{}': {}", dir_path, e))?
        {
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }

        // Readdir order is platform-dependent; sort for determinism
        entries.sort();

        Ok(format!("Directory listing ({}):\n{}", dir_path, entries.join("\n")))
    }
}
