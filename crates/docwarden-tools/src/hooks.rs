// ABOUTME: Tool hooks for the capital-city agent: argument rewriting, blocking, and result notes.
// ABOUTME: Installed on a registry with install_capital_hooks; other tools pass through untouched.

use serde_json::{Value, json};

use crate::capital::get_capital_city;
use crate::tool::{Registry, ToolHook, ToolResult};

const CAPITAL_TOOL: &str = "get_capital_city";

/// Reply used when a call is refused before the tool runs.
pub const BLOCKED_RESULT: &str = "Tool execution was blocked by before_tool_callback.";

/// Redirects `canada` lookups to `france` and refuses the country `BLOCK`.
#[derive(Debug, Clone, Default)]
pub struct CapitalArgsGuard;

impl ToolHook for CapitalArgsGuard {
    fn before(&self, tool: &str, args: &mut Value) -> Option<ToolResult> {
        if tool != CAPITAL_TOOL {
            return None;
        }
        let country = args.get("country").and_then(Value::as_str)?;

        if country.eq_ignore_ascii_case("canada") {
            tracing::debug!("rewriting country {} to France", country);
            args["country"] = json!("France");
            return None;
        }
        if country.eq_ignore_ascii_case("block") {
            tracing::debug!("blocking capital lookup");
            return Some(ToolResult::json(json!({ "result": BLOCKED_RESULT })));
        }
        None
    }
}

/// Annotates the United States capital in lookup results.
#[derive(Debug, Clone, Default)]
pub struct CapitalResultNote;

impl ToolHook for CapitalResultNote {
    fn after(&self, tool: &str, _args: &Value, result: &mut ToolResult) {
        if tool != CAPITAL_TOOL {
            return;
        }
        let capital = get_capital_city("united states");
        if result.content.get("result").and_then(Value::as_str) != Some(capital.as_str()) {
            return;
        }

        result.content["result"] = json!(format!("{} (Note: This is the capital of the USA).", capital));
        result.content["note_added_by_callback"] = json!(true);
    }
}

/// Add both capital hooks to `registry`.
pub async fn install_capital_hooks(registry: &Registry) {
    registry.add_hook(CapitalArgsGuard).await;
    registry.add_hook(CapitalResultNote).await;
}
