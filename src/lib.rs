//! toolbelt - a tool invocation daemon with keyword-based intent routing
//!
//! Exposes a registry of named, schema-described tools behind a uniform
//! request/response protocol, and a deterministic intent router that maps
//! free text to a tool call. Tool failures are ordinary response content,
//! never transport faults.

pub mod config;
pub mod error;
pub mod ipc;
pub mod router;
pub mod tools;

pub use error::{Result, ToolbeltError};
