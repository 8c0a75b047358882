//! Error types for toolbelt
//!
//! Centralized error handling using thiserror.
//!
//! Tool-level failures (unknown tool, bad arguments, executor errors) are
//! deliberately NOT represented here as faults: the dispatcher converts them
//! into failure outcomes carried in the ordinary response envelope. This enum
//! covers the plumbing around the protocol layer.

use thiserror::Error;

/// All error types that can occur in toolbelt
#[derive(Debug, Error)]
pub enum ToolbeltError {
    /// Configuration loading or parsing error
    #[error("Config error: {0}")]
    Config(String),

    /// IPC communication error
    #[error("IPC error: {0}")]
    Ipc(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for toolbelt operations
pub type Result<T> = std::result::Result<T, ToolbeltError>;
