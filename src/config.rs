//! Configuration loading for the toolbelt daemon and CLI
//!
//! YAML file with per-section defaults. The core protocol needs no
//! configuration of its own; everything here is host environment handed to
//! the executors and the transport (socket path, fetch limits, optional
//! file root).

use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tools::ToolContext;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub ipc: IpcConfig,
    pub fetch: FetchConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IpcConfig {
    pub socket_path: PathBuf,
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self {
            socket_path: crate::ipc::default_socket_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub max_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_chars: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Optional root restricting the file tools; unset means unrestricted
    pub root: Option<PathBuf>,
}

impl Config {
    /// Load config from an explicit path, or from the default location.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .context(format!("failed to read config {}", path.display()))?;
        serde_yaml::from_str(&content).context(format!("failed to parse config {}", path.display()))
    }

    /// Default config file location under the platform config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("toolbelt").join("config.yaml"))
    }

    /// Build the executor context this config describes
    pub fn tool_context(&self) -> ToolContext {
        let mut ctx = ToolContext::new()
            .with_fetch_timeout(Duration::from_millis(self.fetch.timeout_ms))
            .with_fetch_max_chars(self.fetch.max_chars);
        if let Some(root) = &self.files.root {
            ctx = ctx.with_root(root);
        }
        ctx
    }
}
