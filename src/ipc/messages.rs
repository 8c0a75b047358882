//! IPC message types for client-daemon communication.
//!
//! Uses JSON Lines (newline-delimited JSON) over a Unix stream socket.
//! Field names follow the familiar id/method/params/result/error shape but
//! this is not a full JSON-RPC 2.0 implementation.
//!
//! Methods: `tools/call`, `tools/list`, `intent/route`. Note the asymmetry
//! baked into the protocol: calling an unknown *tool* is a successful
//! response whose result carries a failure outcome, while an unknown
//! *method* is a transport error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request sent from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Unique request ID for correlating responses.
    pub id: u64,
    /// Method name (e.g., "tools/call").
    pub method: String,
    /// Method parameters as JSON value.
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    /// Create a new request with the given method and params.
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    /// Create a request with no parameters.
    pub fn no_params(id: u64, method: impl Into<String>) -> Self {
        Self::new(id, method, Value::Object(Default::default()))
    }
}

/// Response sent from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Request ID this response corresponds to.
    pub id: u64,
    /// Result value on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error details on transport-level failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// Create a success response.
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: u64, error: RpcError) -> Self {
        Self {
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response carries a result.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Error details in a daemon response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Additional error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Create a new error.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PARSE_ERROR, message)
    }

    /// Invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_REQUEST, message)
    }

    /// Method not found error (-32601).
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::METHOD_NOT_FOUND,
            format!("Unknown method: {}", method.into()),
        )
    }

    /// Invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    /// Internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INTERNAL_ERROR, message)
    }
}

/// Standard error codes.
pub struct ErrorCode;

impl ErrorCode {
    /// Invalid JSON.
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Unknown method.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal daemon error.
    pub const INTERNAL_ERROR: i32 = -32603;
}
