//! text-stats tool - character, word, line, and sentence counts
//!
//! Pure function of the input string: identical input always yields
//! identical counts.

use async_trait::async_trait;
use eyre::eyre;
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct TextStatsTool;

#[async_trait]
impl Tool for TextStatsTool {
    fn name(&self) -> &'static str {
        "text-stats"
    }

    fn description(&self) -> &'static str {
        "Compute character, word, line, and sentence counts for a text."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("text", ParamType::String).describe("Text to analyze"),
        ])
    }

    async fn execute(&self, args: &Value, _ctx: &ToolContext) -> Result<String, eyre::Error> {
        let text = args["text"].as_str().ok_or_else(|| eyre!("text is required"))?;

        let stats = analyze(text);
        Ok(format!(
            "Text statistics:\n{}",
            serde_json::to_string_pretty(&stats)?
        ))
    }
}

#[derive(Debug, PartialEq, serde::Serialize)]
struct TextStats {
    characters: usize,
    words: usize,
    lines: usize,
    sentences: usize,
}

fn analyze(text: &str) -> TextStats {
    TextStats {
        characters: text.chars().count(),
        words: text.split_whitespace().count(),
        lines: text.split('\n').count(),
        sentences: text
            .split(['.', '!', '?'])
            .filter(|segment| !segment.trim().is_empty())
            .count(),
    }
}
