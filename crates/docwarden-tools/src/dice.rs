// ABOUTME: Die rolling tool returning a uniform result between 1 and the number of sides.
// ABOUTME: The roll takes an injected RNG so results are reproducible in tests.

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::tool::{Tool, ToolError, ToolResult, parse_args};

/// Roll a die with `sides` faces.
pub fn roll_die<R: Rng + ?Sized>(sides: u32, rng: &mut R) -> Result<u32, ToolError> {
    if sides == 0 {
        return Err(ToolError::Rejected(
            "A die needs at least one side.".to_string(),
        ));
    }
    Ok(rng.gen_range(1..=sides))
}

#[derive(Debug, Deserialize)]
struct RollDieArgs {
    sides: u32,
}

/// Tool wrapper around [`roll_die`] using the thread RNG.
#[derive(Debug, Clone, Default)]
pub struct RollDieTool;

#[async_trait]
impl Tool for RollDieTool {
    fn name(&self) -> &str {
        "roll_die"
    }

    fn description(&self) -> &str {
        "Roll a die with a given number of sides and return the result."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sides": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Number of sides on the die."
                }
            },
            "required": ["sides"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: RollDieArgs = parse_args(self.name(), params)?;
        let rolled = roll_die(args.sides, &mut rand::thread_rng());
        match rolled {
            Ok(value) => Ok(ToolResult::json(json!({ "result": value }))),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}
