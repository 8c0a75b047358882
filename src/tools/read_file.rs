//! read-file tool - return file contents as text

use async_trait::async_trait;
use eyre::eyre;
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read-file"
    }

    fn description(&self) -> &'static str {
        "Read a file and return its contents as text."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("filePath", ParamType::String).describe("Path of the file to read"),
        ])
    }

    async fn execute(&self, args: &Value, ctx: &ToolContext) -> Result<String, eyre::Error> {
        let file_path = args["filePath"]
            .as_str()
            .ok_or_else(|| eyre!("filePath is required"))?;

        let resolved = ctx.resolve_path(file_path)?;
        let content = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|e| eyre!("failed to read file '{}': {}", file_path, e))?;

        Ok(format!("File contents ({}):\n{}", file_path, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_file_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "line 1\nline 2").unwrap();

        let tool = ReadFileTool;
        let out = tool
            .execute(
                &serde_json::json!({"filePath": path.to_str().unwrap()}),
                &ToolContext::new(),
            )
            .await
            .unwrap();

        assert!(out.starts_with("File contents ("));
        assert!(out.contains("line 1\nline 2"));
    }

    #[tokio::test]
    async fn test_read_file_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent.txt");

        let tool = ReadFileTool;
        let result = tool
            .execute(
                &serde_json::json!({"filePath": path.to_str().unwrap()}),
                &ToolContext::new(),
            )
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to read file"));
    }

    #[tokio::test]
    async fn test_read_file_respects_root() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("inside.txt"), "ok").unwrap();

        let ctx = ToolContext::new().with_root(dir.path());
        let tool = ReadFileTool;

        let out = tool
            .execute(&serde_json::json!({"filePath": "inside.txt"}), &ctx)
            .await
            .unwrap();
        assert!(out.contains("ok"));

        let escape = tool
            .execute(&serde_json::json!({"filePath": "/etc/passwd"}), &ctx)
            .await;
        assert!(escape.is_err());
    }
}
