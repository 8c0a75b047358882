//! Intent router - ordered keyword rules mapping free text to a tool call
//!
//! A deterministic heuristic, not a language model. Rules are held as a
//! declarative table and tried in order against a lowercased copy of the
//! input; the first rule whose keywords match wins, so table order encodes
//! priority. Every input resolves to some tool: the universal fallback echoes
//! the raw text.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::tools::ToolRegistry;

/// A routed tool selection with synthesized arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentMatch {
    pub tool_name: String,
    pub arguments: Value,
    /// Diagnostic explanation only, never consumed programmatically
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// How a rule synthesizes arguments for its tool
#[derive(Debug, Clone)]
enum ArgSynthesis {
    /// A fixed example payload
    Fixed(Value),
    /// The raw user text as the `message` argument
    RawMessage,
}

/// One ordered keyword rule
#[derive(Debug, Clone)]
struct RouteRule {
    keywords: &'static [&'static str],
    tool: &'static str,
    synth: ArgSynthesis,
}

/// The reference rule table. Order is a contract: earlier rules win.
fn rules() -> Vec<RouteRule> {
    vec![
        RouteRule {
            keywords: &["计算", "算", "数学"],
            tool: "calculate",
            synth: ArgSynthesis::Fixed(json!({"expression": "2 + 3 * 4"})),
        },
        RouteRule {
            keywords: &["json", "格式化", "数据"],
            tool: "json-format",
            synth: ArgSynthesis::Fixed(
                json!({"jsonString": "{\"name\":\"张三\",\"age\":25,\"city\":\"北京\"}"}),
            ),
        },
        RouteRule {
            keywords: &["文本", "统计", "分析"],
            tool: "text-stats",
            synth: ArgSynthesis::Fixed(json!({"text": "这是一个测试文本，用于分析统计信息。"})),
        },
        RouteRule {
            keywords: &["系统", "状态", "信息"],
            tool: "system-info",
            synth: ArgSynthesis::Fixed(json!({})),
        },
        RouteRule {
            keywords: &["文件", "读取", "目录"],
            tool: "list-directory",
            synth: ArgSynthesis::Fixed(json!({"dirPath": "."})),
        },
        RouteRule {
            keywords: &["回显", "echo"],
            tool: "echo",
            synth: ArgSynthesis::RawMessage,
        },
    ]
}

/// Tool used when no rule matches
const FALLBACK_TOOL: &str = "echo";

/// Keyword-based tool selector over a registry
pub struct IntentRouter {
    registry: Arc<ToolRegistry>,
    rules: Vec<RouteRule>,
}

impl IntentRouter {
    /// Create a router with the reference rule table.
    ///
    /// Every rule must target a registered tool; a rule pointing at a missing
    /// tool is a construction bug, not a runtime condition.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        let rules = rules();
        debug_assert!(
            rules.iter().all(|rule| registry.contains(rule.tool)) && registry.contains(FALLBACK_TOOL),
            "router rules must target registered tools"
        );
        Self { registry, rules }
    }

    /// The registry this router selects from
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Select a tool and synthesize arguments for the given text.
    ///
    /// Total: every input, including the empty string, yields a match.
    pub fn route(&self, text: &str) -> IntentMatch {
        let normalized = text.to_lowercase();

        for rule in &self.rules {
            if let Some(keyword) = rule.keywords.iter().find(|k| normalized.contains(**k)) {
                debug!("routed input to '{}' via keyword '{}'", rule.tool, keyword);
                return IntentMatch {
                    tool_name: rule.tool.to_string(),
                    arguments: self.synthesize(&rule.synth, text),
                    rationale: Some(format!(
                        "input contains '{}', selecting {}",
                        keyword, rule.tool
                    )),
                };
            }
        }

        debug!("no rule matched, falling back to '{}'", FALLBACK_TOOL);
        IntentMatch {
            tool_name: FALLBACK_TOOL.to_string(),
            arguments: json!({"message": text}),
            rationale: Some(format!("no rule matched, falling back to {}", FALLBACK_TOOL)),
        }
    }

    fn synthesize(&self, synth: &ArgSynthesis, text: &str) -> Value {
        match synth {
            ArgSynthesis::Fixed(value) => value.clone(),
            ArgSynthesis::RawMessage => json!({"message": text}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> IntentRouter {
        IntentRouter::new(Arc::new(ToolRegistry::standard()))
    }

    #[test]
    fn test_route_is_total() {
        let r = router();
        for input in ["", "   ", "hello there", "计算", "随便说点什么", "ECHO this"] {
            let m = r.route(input);
            assert!(
                r.registry().contains(&m.tool_name),
                "routed tool '{}' must exist",
                m.tool_name
            );
            assert!(m.arguments.is_object());
        }
    }

    #[test]
    fn test_empty_input_falls_back_to_echo() {
        let m = router().route("");
        assert_eq!(m.tool_name, "echo");
        assert_eq!(m.arguments["message"], "");
    }

    #[test]
    fn test_calculate_keywords() {
        let r = router();
        for input in ["帮我计算一下", "算一算", "做点数学"] {
            assert_eq!(r.route(input).tool_name, "calculate");
        }
    }

    #[test]
    fn test_calculate_synthesizes_example_expression() {
        let m = router().route("计算");
        assert_eq!(m.arguments["expression"], "2 + 3 * 4");
    }

    #[test]
    fn test_json_keywords() {
        let r = router();
        assert_eq!(r.route("帮我处理json").tool_name, "json-format");
        assert_eq!(r.route("格式化这个").tool_name, "json-format");
        assert_eq!(r.route("看看这些数据").tool_name, "json-format");
    }

    #[test]
    fn test_text_stats_keywords() {
        let r = router();
        assert_eq!(r.route("分析这段文本").tool_name, "text-stats");
        assert_eq!(r.route("统计一下").tool_name, "text-stats");
    }

    #[test]
    fn test_system_info_keywords() {
        let r = router();
        let m = r.route("系统状态如何");
        assert_eq!(m.tool_name, "system-info");
        assert_eq!(m.arguments, json!({}));
    }

    #[test]
    fn test_list_directory_keywords() {
        let r = router();
        let m = r.route("看看目录里有什么");
        assert_eq!(m.tool_name, "list-directory");
        assert_eq!(m.arguments["dirPath"], ".");
    }

    #[test]
    fn test_echo_keyword_carries_raw_text() {
        let m = router().route("please echo me");
        assert_eq!(m.tool_name, "echo");
        assert_eq!(m.arguments["message"], "please echo me");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(router().route("ECHO THIS").tool_name, "echo");
        assert_eq!(router().route("some JSON here").tool_name, "json-format");
    }

    #[test]
    fn test_fallback_carries_raw_text() {
        let m = router().route("nothing matches here");
        assert_eq!(m.tool_name, "echo");
        assert_eq!(m.arguments["message"], "nothing matches here");
        assert!(m.rationale.unwrap().contains("no rule matched"));
    }

    #[test]
    fn test_rationale_names_matched_keyword() {
        let m = router().route("计算");
        assert!(m.rationale.unwrap().contains("计算"));
    }

    #[test]
    fn test_rule_pair_precedence() {
        // For every pair of rules, input containing keywords from both must
        // resolve to the earlier rule. This locks table order as a contract.
        let r = router();
        let table = rules();

        for (i, earlier) in table.iter().enumerate() {
            for later in table.iter().skip(i + 1) {
                let input = format!("{} {}", earlier.keywords[0], later.keywords[0]);
                let m = r.route(&input);
                assert_eq!(
                    m.tool_name, earlier.tool,
                    "input '{}' must resolve to the earlier rule",
                    input
                );
            }
        }
    }

    #[test]
    fn test_intent_match_serialization() {
        let m = router().route("计算");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["tool_name"], "calculate");
        assert!(json["rationale"].is_string());
    }
}
