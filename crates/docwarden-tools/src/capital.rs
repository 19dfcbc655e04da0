// ABOUTME: Capital city lookup tool backed by a small fixed table.
// ABOUTME: Country names match case-insensitively; unknown countries get an apology string.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::tool::{Tool, ToolResult, parse_args};

const CAPITALS: &[(&str, &str)] = &[
    ("united states", "Washington, D.C."),
    ("canada", "Ottawa"),
    ("france", "Paris"),
    ("japan", "Tokyo"),
];

/// Look up the capital of `country`.
pub fn get_capital_city(country: &str) -> String {
    let key = country.trim().to_lowercase();
    CAPITALS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, capital)| capital.to_string())
        .unwrap_or_else(|| format!("Sorry, I couldn't find the capital for {}.", country))
}

#[derive(Debug, Deserialize)]
struct CountryArgs {
    country: String,
}

#[derive(Debug, Clone, Default)]
pub struct CapitalCityTool;

#[async_trait]
impl Tool for CapitalCityTool {
    fn name(&self) -> &str {
        "get_capital_city"
    }

    fn description(&self) -> &str {
        "Retrieves the capital city for a given country"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "country": {
                    "type": "string",
                    "description": "The country to get the capital for."
                }
            },
            "required": ["country"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: CountryArgs = parse_args(self.name(), params)?;
        Ok(ToolResult::json(json!({ "result": get_capital_city(&args.country) })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(get_capital_city("France"), "Paris");
        assert_eq!(get_capital_city("UNITED STATES"), "Washington, D.C.");
        assert_eq!(get_capital_city(" japan "), "Tokyo");
    }

    #[test]
    fn unknown_country_apologizes_with_original_spelling() {
        assert_eq!(
            get_capital_city("Atlantis"),
            "Sorry, I couldn't find the capital for Atlantis."
        );
    }

    #[tokio::test]
    async fn tool_wraps_result() {
        let out = CapitalCityTool
            .execute(json!({ "country": "canada" }))
            .await
            .unwrap();
        assert_eq!(out.content, json!({ "result": "Ottawa" }));
    }
}
