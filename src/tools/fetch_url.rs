//! fetch-url tool - fetch a resource and return a truncated text body

use async_trait::async_trait;
use eyre::eyre;
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct FetchUrlTool;

#[async_trait]
impl Tool for FetchUrlTool {
    fn name(&self) -> &'static str {
        "fetch-url"
    }

    fn description(&self) -> &'static str {
        "Fetch a URL and return up to the first 1000 characters of the body."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("url", ParamType::String).describe("URL to fetch"),
        ])
    }

    async fn execute(&self, args: &Value, ctx: &ToolContext) -> Result<String, eyre::Error> {
        let url = args["url"].as_str().ok_or_else(|| eyre!("url is required"))?;

        // Reject malformed URLs before any network I/O
        let parsed = reqwest::Url::parse(url).map_err(|e| eyre!("invalid URL '{}': {}", url, e))?;

        let response = ctx
            .http()
            .get(parsed)
            .timeout(ctx.fetch_timeout())
            .send()
            .await
            .map_err(|e| eyre!("failed to fetch '{}': {}", url, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| eyre!("failed to read body of '{}': {}", url, e))?;

        Ok(format!(
            "URL content ({}):\n{}",
            url,
            truncate(&body, ctx.fetch_max_chars())
        ))
    }
}

/// First `max_chars` characters, with an ellipsis marker when truncated
fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let mut out: String = body.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_body_unchanged() {
        assert_eq!(truncate("short", 1000), "short");
    }

    #[test]
    fn test_truncate_long_body_marked() {
        let body = "x".repeat(1500);
        let out = truncate(&body, 1000);
        assert_eq!(out.len(), 1003);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_boundary() {
        let body = "y".repeat(1000);
        assert_eq!(truncate(&body, 1000), body);
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let body = "中".repeat(1200);
        let out = truncate(&body, 1000);
        assert_eq!(out.chars().count(), 1003);
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_without_network() {
        let tool = FetchUrlTool;
        let result = tool
            .execute(&serde_json::json!({"url": "not a url"}), &ToolContext::new())
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid URL"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() {
        let tool = FetchUrlTool;
        let ctx = ToolContext::new().with_fetch_timeout(std::time::Duration::from_millis(200));
        let result = tool
            .execute(
                &serde_json::json!({"url": "http://127.0.0.1:1/nothing-listens-here"}),
                &ctx,
            )
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to fetch"));
    }
}
