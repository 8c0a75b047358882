//! echo tool - return the message with a fixed label

use async_trait::async_trait;
use eyre::eyre;
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn description(&self) -> &'static str {
        "Echo a message back, prefixed with the tool label."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("message", ParamType::String).describe("Message to echo"),
        ])
    }

    async fn execute(&self, args: &Value, _ctx: &ToolContext) -> Result<String, eyre::Error> {
        let message = args["message"].as_str().ok_or_else(|| eyre!("message is required"))?;
        Ok(format!("Tool echo: {}", message))
    }
}
