//! Dispatcher - validates and executes tool invocations
//!
//! `invoke` is total with respect to observable behavior: every call returns
//! a well-formed response. Unknown tools, schema violations, and executor
//! failures all become failure outcomes in the ordinary envelope; nothing
//! propagates as a fault past this boundary.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde_json::Value;

use super::{InvocationResponse, ToolContext, ToolRegistry};

/// Validates requests against the registry and runs tool executors
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    ctx: ToolContext,
}

impl Dispatcher {
    /// Create a dispatcher over the given registry and execution context
    pub fn new(registry: Arc<ToolRegistry>, ctx: ToolContext) -> Self {
        Self { registry, ctx }
    }

    /// The registry this dispatcher serves
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Invoke a tool by name with the given arguments.
    ///
    /// Always returns a response: failures are carried as diagnostic text in
    /// the same envelope a success would use.
    pub async fn invoke(&self, name: &str, args: &Value) -> InvocationResponse {
        let Some(tool) = self.registry.get(name) else {
            warn!("invocation of unknown tool '{}'", name);
            return InvocationResponse::failure(format!("Unknown tool: {}", name));
        };

        if let Err(violation) = tool.schema().validate(args) {
            debug!("rejected arguments for '{}': {}", name, violation);
            return InvocationResponse::failure(format!(
                "Invalid arguments for '{}': {}",
                name, violation
            ));
        }

        match tool.execute(args, &self.ctx).await {
            Ok(text) => InvocationResponse::success(text),
            Err(e) => {
                debug!("tool '{}' failed: {}", name, e);
                InvocationResponse::failure(format!("Tool '{}' failed: {}", name, e))
            }
        }
    }

    /// Invoke with a caller-imposed timeout wrapping the whole call.
    ///
    /// Expiry produces a failure outcome, not a crash.
    pub async fn invoke_with_timeout(
        &self,
        name: &str,
        args: &Value,
        timeout: Duration,
    ) -> InvocationResponse {
        match tokio::time::timeout(timeout, self.invoke(name, args)).await {
            Ok(response) => response,
            Err(_) => InvocationResponse::failure(format!(
                "Tool '{}' timed out after {}ms",
                name,
                timeout.as_millis()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ParamSpec, ParamType, ParameterSchema, Tool};
    use async_trait::async_trait;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(ToolRegistry::standard()), ToolContext::new())
    }

    #[tokio::test]
    async fn test_unknown_tool_is_failure_outcome() {
        let d = dispatcher();
        let resp = d.invoke("nonexistent-tool", &json!({})).await;

        assert!(resp.is_error);
        assert!(resp.text().contains("Unknown tool: nonexistent-tool"));
    }

    #[tokio::test]
    async fn test_echo_roundtrip() {
        let d = dispatcher();
        let resp = d.invoke("echo", &json!({"message": "hi"})).await;

        assert!(!resp.is_error);
        assert!(resp.text().contains("hi"));
    }

    #[tokio::test]
    async fn test_calculate_exact_output() {
        let d = dispatcher();
        let resp = d.invoke("calculate", &json!({"expression": "2 + 3 * 4"})).await;

        assert!(!resp.is_error);
        assert_eq!(resp.text(), "2 + 3 * 4 = 14");
    }

    #[tokio::test]
    async fn test_calculate_malformed_is_failure_outcome() {
        let d = dispatcher();
        let resp = d.invoke("calculate", &json!({"expression": "not an expr"})).await;

        assert!(resp.is_error);
        assert!(resp.text().contains("calculate"));
    }

    #[tokio::test]
    async fn test_missing_required_param() {
        let d = dispatcher();
        let resp = d.invoke("echo", &json!({})).await;

        assert!(resp.is_error);
        assert!(resp.text().contains("missing required parameter 'message'"));
    }

    #[tokio::test]
    async fn test_wrong_param_type() {
        let d = dispatcher();
        let resp = d.invoke("echo", &json!({"message": 42})).await;

        assert!(resp.is_error);
        assert!(resp.text().contains("must be a string"));
    }

    #[tokio::test]
    async fn test_validation_happens_before_execution() {
        // A tool that would panic if executed; schema rejection must shield it
        struct PanicTool;

        #[async_trait]
        impl Tool for PanicTool {
            fn name(&self) -> &'static str {
                "panic-tool"
            }
            fn description(&self) -> &'static str {
                "never runs"
            }
            fn schema(&self) -> ParameterSchema {
                ParameterSchema::new(vec![ParamSpec::required("input", ParamType::String)])
            }
            async fn execute(
                &self,
                _args: &serde_json::Value,
                _ctx: &ToolContext,
            ) -> Result<String, eyre::Error> {
                panic!("executor must not run on schema violation");
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PanicTool));
        let d = Dispatcher::new(Arc::new(registry), ToolContext::new());

        let resp = d.invoke("panic-tool", &json!({})).await;
        assert!(resp.is_error);
    }

    #[tokio::test]
    async fn test_timeout_produces_failure_outcome() {
        struct SlowTool;

        #[async_trait]
        impl Tool for SlowTool {
            fn name(&self) -> &'static str {
                "slow-tool"
            }
            fn description(&self) -> &'static str {
                "sleeps"
            }
            fn schema(&self) -> ParameterSchema {
                ParameterSchema::empty()
            }
            async fn execute(
                &self,
                _args: &serde_json::Value,
                _ctx: &ToolContext,
            ) -> Result<String, eyre::Error> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("done".to_string())
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(SlowTool));
        let d = Dispatcher::new(Arc::new(registry), ToolContext::new());

        let resp = d
            .invoke_with_timeout("slow-tool", &json!({}), Duration::from_millis(50))
            .await;
        assert!(resp.is_error);
        assert!(resp.text().contains("timed out"));
    }

    #[tokio::test]
    async fn test_concurrent_invocations() {
        let d = Arc::new(dispatcher());

        let mut handles = Vec::new();
        for i in 0..8 {
            let d = d.clone();
            handles.push(tokio::spawn(async move {
                d.invoke("echo", &json!({"message": format!("msg-{}", i)})).await
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            let resp = handle.await.unwrap();
            assert!(!resp.is_error);
            assert!(resp.text().contains(&format!("msg-{}", i)));
        }
    }
}
