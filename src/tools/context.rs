//! Tool execution context - host-supplied environment for executors
//!
//! Carries the values executors need that are not core protocol state: an
//! optional filesystem root for the file tools, a shared HTTP client and
//! fetch limits for fetch-url, and the process start instant for uptime
//! reporting. Cloning is cheap; all invocations of a process share one
//! context.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use eyre::eyre;

/// Execution context shared by all tool invocations
#[derive(Clone)]
pub struct ToolContext {
    /// Optional filesystem root. When set, file tool paths must resolve
    /// inside it; when unset, paths are taken as-is.
    root: Option<PathBuf>,

    /// Shared HTTP client for fetch-url
    http: reqwest::Client,

    /// Timeout applied to outbound fetches
    fetch_timeout: Duration,

    /// Maximum characters of fetched body returned before truncation
    fetch_max_chars: usize,

    /// Process start, for uptime reporting
    started_at: Instant,
}

impl ToolContext {
    /// Context with no filesystem restriction and default fetch limits
    pub fn new() -> Self {
        Self {
            root: None,
            http: reqwest::Client::new(),
            fetch_timeout: Duration::from_millis(30_000),
            fetch_max_chars: 1000,
            started_at: Instant::now(),
        }
    }

    /// Restrict file tools to paths under the given root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Set the outbound fetch timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the fetch truncation limit in characters
    pub fn with_fetch_max_chars(mut self, max_chars: usize) -> Self {
        self.fetch_max_chars = max_chars;
        self
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn fetch_max_chars(&self) -> usize {
        self.fetch_max_chars
    }

    /// Seconds since this context was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Resolve a file tool path, enforcing the root restriction if one is set.
    ///
    /// Relative paths resolve against the root (or the current directory when
    /// unrestricted). For paths that do not exist yet, the non-canonical form
    /// is checked instead.
    pub fn resolve_path(&self, path: &str) -> Result<PathBuf, eyre::Error> {
        let requested = Path::new(path);

        let Some(root) = &self.root else {
            return Ok(requested.to_path_buf());
        };

        let joined = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            root.join(requested)
        };

        let root_canonical = root
            .canonicalize()
            .map_err(|e| eyre!("invalid file root {}: {}", root.display(), e))?;
        let resolved = joined.canonicalize().unwrap_or_else(|_| joined.clone());

        if resolved.starts_with(&root_canonical) || joined.starts_with(&root_canonical) {
            Ok(resolved)
        } else {
            Err(eyre!("path '{}' escapes file root {}", path, root.display()))
        }
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new()
    }
}
