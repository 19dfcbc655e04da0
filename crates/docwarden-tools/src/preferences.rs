// ABOUTME: Tool that records a user preference into session state.
// ABOUTME: Preferences live as a JSON object under the `user:preferences` key.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::state::SessionState;
use crate::tool::{Tool, ToolResult, parse_args};

pub const USER_PREFERENCES_KEY: &str = "user:preferences";

/// Set `preference` to `value` in the session's preference map. A missing or
/// non-object entry is replaced with a fresh map.
pub async fn update_user_preference(state: &SessionState, preference: &str, value: &str) {
    state
        .update(USER_PREFERENCES_KEY, |current| {
            let mut prefs = match current {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            };
            prefs.insert(preference.to_string(), Value::String(value.to_string()));
            Value::Object(prefs)
        })
        .await;
    tracing::info!("updated user preference '{}' to '{}'", preference, value);
}

#[derive(Debug, Deserialize)]
struct PreferenceArgs {
    preference: String,
    value: String,
}

#[derive(Debug, Clone)]
pub struct UserPreferenceTool {
    pub(crate) state: SessionState,
}

impl UserPreferenceTool {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Tool for UserPreferenceTool {
    fn name(&self) -> &str {
        "update_user_preference"
    }

    fn description(&self) -> &str {
        "Updates a user-specific preference."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "preference": {
                    "type": "string",
                    "description": "The name of the preference to set."
                },
                "value": {
                    "type": "string",
                    "description": "The value to set for the preference."
                }
            },
            "required": ["preference", "value"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: PreferenceArgs = parse_args(self.name(), params)?;
        update_user_preference(&self.state, &args.preference, &args.value).await;
        Ok(ToolResult::json(json!({ "updated_preference": args.preference })))
    }
}
