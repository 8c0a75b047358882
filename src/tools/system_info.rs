//! system-info tool - platform, version, uptime, and memory snapshot

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::{ParameterSchema, Tool, ToolContext};

pub struct SystemInfoTool;

#[async_trait]
impl Tool for SystemInfoTool {
    fn name(&self) -> &'static str {
        "system-info"
    }

    fn description(&self) -> &'static str {
        "Report platform, server version, process uptime, memory usage, and current time."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::empty()
    }

    async fn execute(&self, _args: &Value, ctx: &ToolContext) -> Result<String, eyre::Error> {
        let info = serde_json::json!({
            "platform": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_secs": ctx.uptime_secs(),
            "memory": memory_snapshot(),
            "current_time": Utc::now().to_rfc3339(),
        });

        Ok(format!(
            "System information:\n{}",
            serde_json::to_string_pretty(&info)?
        ))
    }
}

/// Resident/virtual memory of this process, when the platform exposes it
fn memory_snapshot() -> Value {
    match std::fs::read_to_string("/proc/self/status") {
        Ok(status) => {
            let field = |key: &str| {
                status
                    .lines()
                    .find(|line| line.starts_with(key))
                    .map(|line| line.trim_start_matches(key).trim().to_string())
            };
            serde_json::json!({
                "rss": field("VmRSS:").unwrap_or_else(|| "unavailable".to_string()),
                "vsize": field("VmSize:").unwrap_or_else(|| "unavailable".to_string()),
            })
        }
        Err(_) => Value::String("unavailable".to_string()),
    }
}
