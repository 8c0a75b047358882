//! IPC layer - JSON-lines Unix-socket transport for the tool protocol
//!
//! This is a delivery mechanism, not part of the invocation contract: the
//! same request/response semantics could ride any transport. Tool-level
//! failures travel inside results; the `error` member is reserved for
//! transport faults such as malformed JSON or unknown methods.

pub mod client;
pub mod messages;
pub mod server;

pub use client::{IpcClient, IpcClientConfig};
pub use messages::{ErrorCode, RpcError, RpcRequest, RpcResponse};
pub use server::{IpcServer, IpcServerConfig};

use std::path::PathBuf;

/// Default socket path for the toolbelt daemon
pub fn default_socket_path() -> PathBuf {
    std::env::temp_dir().join("toolbelt.sock")
}
