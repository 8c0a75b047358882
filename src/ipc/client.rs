//! IPC client for talking to a running toolbelt daemon.
//!
//! Sequential request/response over the daemon's Unix socket: send one
//! JSON line, read one JSON line. Used by the CLI when `--socket` is given.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::net::unix::OwnedWriteHalf;
use tokio::sync::Mutex;

use crate::error::{Result, ToolbeltError};
use crate::ipc::messages::{RpcRequest, RpcResponse};
use crate::router::IntentMatch;
use crate::tools::{InvocationResponse, ToolDefinition};

/// Configuration for the IPC client.
#[derive(Debug, Clone)]
pub struct IpcClientConfig {
    /// Path to the daemon Unix socket.
    pub socket_path: PathBuf,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for IpcClientConfig {
    fn default() -> Self {
        Self {
            socket_path: super::default_socket_path(),
            request_timeout_ms: 30_000,
        }
    }
}

impl IpcClientConfig {
    /// Create config with a custom socket path.
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: path.into(),
            ..Default::default()
        }
    }
}

/// Client connection to the daemon socket.
pub struct IpcClient {
    config: IpcClientConfig,
    reader: Mutex<BufReader<tokio::net::unix::OwnedReadHalf>>,
    writer: Mutex<OwnedWriteHalf>,
    next_id: AtomicU64,
}

impl IpcClient {
    /// Connect to the daemon socket.
    pub async fn connect(config: IpcClientConfig) -> Result<Self> {
        let stream = UnixStream::connect(&config.socket_path).await.map_err(|e| {
            ToolbeltError::Ipc(format!(
                "failed to connect to {}: {}",
                config.socket_path.display(),
                e
            ))
        })?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            config,
            reader: Mutex::new(BufReader::new(read_half)),
            writer: Mutex::new(write_half),
            next_id: AtomicU64::new(1),
        })
    }

    /// Send one request and await its response.
    pub async fn request(&self, method: &str, params: Value) -> Result<RpcResponse> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = RpcRequest::new(id, method, params);

        let mut payload = serde_json::to_string(&request)?;
        payload.push('\n');

        let timeout = Duration::from_millis(self.config.request_timeout_ms);
        let response = tokio::time::timeout(timeout, async {
            {
                let mut writer = self.writer.lock().await;
                writer.write_all(payload.as_bytes()).await?;
            }

            let mut line = String::new();
            let mut reader = self.reader.lock().await;
            let n = reader.read_line(&mut line).await?;
            if n == 0 {
                return Err(ToolbeltError::Ipc("daemon closed the connection".to_string()));
            }
            Ok(serde_json::from_str::<RpcResponse>(line.trim())?)
        })
        .await
        .map_err(|_| ToolbeltError::Ipc(format!("request '{}' timed out", method)))??;

        if response.id != id {
            return Err(ToolbeltError::Ipc(format!(
                "response id {} does not match request id {}",
                response.id, id
            )));
        }
        Ok(response)
    }

    /// Invoke a tool through the daemon.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<InvocationResponse> {
        let response = self
            .request("tools/call", json!({"name": name, "arguments": arguments}))
            .await?;
        let result = expect_result(response)?;
        Ok(serde_json::from_value(result)?)
    }

    /// Enumerate the daemon's registered tools.
    pub async fn list_tools(&self) -> Result<Vec<ToolDefinition>> {
        let response = self.request("tools/list", json!({})).await?;
        let result = expect_result(response)?;
        Ok(serde_json::from_value(result["tools"].clone())?)
    }

    /// Route free text to a tool selection.
    pub async fn route(&self, text: &str) -> Result<IntentMatch> {
        let response = self.request("intent/route", json!({"text": text})).await?;
        let result = expect_result(response)?;
        Ok(serde_json::from_value(result)?)
    }
}

/// Unwrap the result member, converting transport errors
fn expect_result(response: RpcResponse) -> Result<Value> {
    match (response.result, response.error) {
        (Some(result), None) => Ok(result),
        (_, Some(error)) => Err(ToolbeltError::Ipc(format!(
            "daemon error {}: {}",
            error.code, error.message
        ))),
        (None, None) => Err(ToolbeltError::Ipc("response carried neither result nor error".to_string())),
    }
}
