//! json-format tool - parse and re-serialize JSON with stable indentation

use async_trait::async_trait;
use eyre::eyre;
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct JsonFormatTool;

#[async_trait]
impl Tool for JsonFormatTool {
    fn name(&self) -> &'static str {
        "json-format"
    }

    fn description(&self) -> &'static str {
        "Pretty-print a JSON string with 2-space indentation, preserving key order."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("jsonString", ParamType::String).describe("JSON string to format"),
        ])
    }

    async fn execute(&self, args: &Value, _ctx: &ToolContext) -> Result<String, eyre::Error> {
        let json_string = args["jsonString"]
            .as_str()
            .ok_or_else(|| eyre!("jsonString is required"))?;

        let parsed: Value =
            serde_json::from_str(json_string).map_err(|e| eyre!("invalid JSON: {}", e))?;
        let formatted = serde_json::to_string_pretty(&parsed)?;

        Ok(format!("Formatted JSON:\n{}", formatted))
    }
}
