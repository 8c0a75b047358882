//! IPC server - Unix socket daemon carrying the tool protocol
//!
//! Listens on a Unix stream socket, reads newline-delimited JSON requests,
//! and routes them to the dispatcher, the registry enumeration, or the
//! intent router. Each connection is served by its own task; invocations on
//! different connections run concurrently.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

use crate::error::{Result, ToolbeltError};
use crate::ipc::messages::{RpcError, RpcRequest, RpcResponse};
use crate::router::IntentRouter;
use crate::tools::Dispatcher;

/// Configuration for the IPC server
#[derive(Debug, Clone)]
pub struct IpcServerConfig {
    /// Path to the Unix socket
    pub socket_path: PathBuf,
}

impl Default for IpcServerConfig {
    fn default() -> Self {
        Self {
            socket_path: super::default_socket_path(),
        }
    }
}

impl IpcServerConfig {
    /// Create config with a custom socket path
    pub fn with_socket_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.socket_path = path.as_ref().to_path_buf();
        self
    }
}

/// Shared per-daemon state behind every connection
struct ServerState {
    dispatcher: Dispatcher,
    router: IntentRouter,
}

/// IPC server for the tool invocation daemon
pub struct IpcServer {
    config: IpcServerConfig,
    state: Arc<ServerState>,
}

impl IpcServer {
    /// Create a server over the given dispatcher and router
    pub fn new(config: IpcServerConfig, dispatcher: Dispatcher, router: IntentRouter) -> Self {
        Self {
            config,
            state: Arc::new(ServerState { dispatcher, router }),
        }
    }

    /// The socket path this server binds to
    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    /// Accept connections until the task is cancelled or accept fails
    pub async fn run(&self) -> Result<()> {
        // Stale socket from a previous run would make bind fail
        if self.config.socket_path.exists() {
            std::fs::remove_file(&self.config.socket_path)?;
        }

        let listener = UnixListener::bind(&self.config.socket_path)
            .map_err(|e| ToolbeltError::Ipc(format!("failed to bind {}: {}", self.config.socket_path.display(), e)))?;
        info!("listening on {}", self.config.socket_path.display());

        loop {
            let (stream, _) = listener
                .accept()
                .await
                .map_err(|e| ToolbeltError::Ipc(format!("accept failed: {}", e)))?;

            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, state).await {
                    warn!("connection ended with error: {}", e);
                }
            });
        }
    }
}

/// Serve one client connection until it disconnects
async fn handle_connection(stream: UnixStream, state: Arc<ServerState>) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            debug!("client disconnected");
            return Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(trimmed) {
            Ok(request) => handle_request(&state, request).await,
            Err(e) => RpcResponse::error(0, RpcError::parse_error(e.to_string())),
        };

        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        write_half.write_all(payload.as_bytes()).await?;
    }
}

/// Route one request to the protocol entry points
async fn handle_request(state: &ServerState, request: RpcRequest) -> RpcResponse {
    debug!("handling '{}' (id {})", request.method, request.id);

    match request.method.as_str() {
        "tools/call" => handle_tools_call(state, request).await,
        "tools/list" => handle_tools_list(state, request),
        "intent/route" => handle_intent_route(state, request),
        method => RpcResponse::error(request.id, RpcError::method_not_found(method)),
    }
}

async fn handle_tools_call(state: &ServerState, request: RpcRequest) -> RpcResponse {
    let Some(name) = request.params["name"].as_str() else {
        return RpcResponse::error(
            request.id,
            RpcError::invalid_params("'name' must be a string"),
        );
    };
    let arguments = match request.params.get("arguments") {
        None => Value::Object(Default::default()),
        Some(args) => args.clone(),
    };

    // Tool-level failures (unknown tool included) ride in the result
    let response = state.dispatcher.invoke(name, &arguments).await;
    match serde_json::to_value(&response) {
        Ok(result) => RpcResponse::success(request.id, result),
        Err(e) => RpcResponse::error(request.id, RpcError::internal_error(e.to_string())),
    }
}

fn handle_tools_list(state: &ServerState, request: RpcRequest) -> RpcResponse {
    let definitions = state.dispatcher.registry().definitions();
    match serde_json::to_value(&definitions) {
        Ok(tools) => RpcResponse::success(request.id, serde_json::json!({ "tools": tools })),
        Err(e) => RpcResponse::error(request.id, RpcError::internal_error(e.to_string())),
    }
}

fn handle_intent_route(state: &ServerState, request: RpcRequest) -> RpcResponse {
    let Some(text) = request.params["text"].as_str() else {
        return RpcResponse::error(
            request.id,
            RpcError::invalid_params("'text' must be a string"),
        );
    };

    let intent = state.router.route(text);
    match serde_json::to_value(&intent) {
        Ok(result) => RpcResponse::success(request.id, result),
        Err(e) => RpcResponse::error(request.id, RpcError::internal_error(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolContext, ToolRegistry};
    use serde_json::json;

    fn state() -> ServerState {
        let registry = Arc::new(ToolRegistry::standard());
        ServerState {
            dispatcher: Dispatcher::new(Arc::clone(&registry), ToolContext::new()),
            router: IntentRouter::new(registry),
        }
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let s = state();
        let req = RpcRequest::new(1, "tools/call", json!({"name": "echo", "arguments": {"message": "hi"}}));
        let resp = handle_request(&s, req).await;

        assert!(resp.is_success());
        let result = resp.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert!(result["content"][0]["text"].as_str().unwrap().contains("hi"));
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool_is_result_not_error() {
        let s = state();
        let req = RpcRequest::new(2, "tools/call", json!({"name": "nonexistent-tool"}));
        let resp = handle_request(&s, req).await;

        // Unknown tool is a failure outcome inside the result envelope
        assert!(resp.is_success());
        let result = resp.result.unwrap();
        assert_eq!(result["is_error"], true);
        assert!(result["content"][0]["text"].as_str().unwrap().contains("nonexistent-tool"));
    }

    #[tokio::test]
    async fn test_tools_call_missing_name_is_invalid_params() {
        let s = state();
        let req = RpcRequest::new(3, "tools/call", json!({"arguments": {}}));
        let resp = handle_request(&s, req).await;

        assert!(!resp.is_success());
        assert_eq!(resp.error.unwrap().code, crate::ipc::ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tools_call_defaults_arguments() {
        let s = state();
        let req = RpcRequest::new(4, "tools/call", json!({"name": "system-info"}));
        let resp = handle_request(&s, req).await;

        assert!(resp.is_success());
        let result = resp.result.unwrap();
        assert!(result.get("is_error").is_none());
    }

    #[tokio::test]
    async fn test_tools_list_ordered() {
        let s = state();
        let resp = handle_request(&s, RpcRequest::no_params(5, "tools/list")).await;

        let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 9);
        assert_eq!(tools[0]["name"], "echo");
        assert_eq!(tools[1]["name"], "calculate");
        assert!(tools[0]["input_schema"]["properties"]["message"].is_object());
    }

    #[tokio::test]
    async fn test_intent_route() {
        let s = state();
        let req = RpcRequest::new(6, "intent/route", json!({"text": "帮我计算"}));
        let resp = handle_request(&s, req).await;

        let result = resp.result.unwrap();
        assert_eq!(result["tool_name"], "calculate");
        assert!(result["rationale"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let s = state();
        let resp = handle_request(&s, RpcRequest::no_params(7, "bogus/method")).await;

        assert!(!resp.is_success());
        assert_eq!(resp.error.unwrap().code, crate::ipc::ErrorCode::METHOD_NOT_FOUND);
    }
}
