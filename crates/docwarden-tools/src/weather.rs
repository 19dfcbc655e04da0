// ABOUTME: City weather, local time, and text sentiment tools for the weather agent.
// ABOUTME: Weather comes from fixed reports; time uses IANA zones via chrono-tz with a few city aliases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::tool::{StatusReport, Tool, ToolResult, parse_args};

const WEATHER_REPORTS: &[(&str, &str)] = &[
    (
        "new york",
        "The weather in New York is sunny with a temperature of 25 degrees Celsius (77 degrees Fahrenheit).",
    ),
    (
        "london",
        "The current weather in London is cloudy with a temperature of 18 degrees Celsius and a chance of rain.",
    ),
    (
        "paris",
        "The weather in Paris is sunny with a temperature of 25 degrees Celsius.",
    ),
];

const CITY_ZONES: &[(&str, Tz)] = &[
    ("new york", chrono_tz::America::New_York),
    ("london", chrono_tz::Europe::London),
    ("paris", chrono_tz::Europe::Paris),
    ("tokyo", chrono_tz::Asia::Tokyo),
];

/// Weather report for `city`. Matches when the city name contains a known city.
pub fn get_weather(city: &str) -> StatusReport {
    let key = city.to_lowercase();
    match WEATHER_REPORTS.iter().find(|(name, _)| key.contains(name)) {
        Some((_, report)) => StatusReport::Success {
            report: report.to_string(),
        },
        None => StatusReport::Error {
            error_message: format!("Weather information for '{}' is not available.", city),
        },
    }
}

/// Resolve a city to a time zone: first as an IANA name with spaces turned
/// into underscores, then through the alias table.
pub fn resolve_zone(city: &str) -> Option<Tz> {
    if let Ok(tz) = city.trim().replace(' ', "_").parse::<Tz>() {
        return Some(tz);
    }
    let key = city.trim().to_lowercase();
    CITY_ZONES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, tz)| *tz)
}

/// Local time in `city` at instant `now`.
pub fn get_current_time(city: &str, now: DateTime<Utc>) -> StatusReport {
    match resolve_zone(city) {
        Some(tz) => StatusReport::Success {
            report: format!(
                "The current time in {} is {}",
                city,
                now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z")
            ),
        },
        None => StatusReport::Error {
            error_message: format!("Sorry, I don't have timezone information for {}.", city),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Keyword sentiment of a weather report.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    if text.contains("cloudy") || text.contains("rain") {
        Sentiment::Negative
    } else if text.contains("sunny") {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

#[derive(Debug, Deserialize)]
struct CityArgs {
    city: String,
}

#[derive(Debug, Deserialize)]
struct TextArgs {
    text: String,
}

fn city_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "city": {
                "type": "string",
                "description": description
            }
        },
        "required": ["city"]
    })
}

fn report_result(report: StatusReport) -> Result<ToolResult, anyhow::Error> {
    let is_error = !report.is_success();
    let mut result = ToolResult::from_serialize(&report)?;
    result.is_error = is_error;
    Ok(result)
}

#[derive(Debug, Clone, Default)]
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Retrieves the current weather report for a specified city."
    }

    fn schema(&self) -> Value {
        city_schema("The name of the city for which to retrieve the weather report.")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: CityArgs = parse_args(self.name(), params)?;
        report_result(get_weather(&args.city))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        "Returns the current time in a specified city."
    }

    fn schema(&self) -> Value {
        city_schema("The name of the city for which to retrieve the current time.")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: CityArgs = parse_args(self.name(), params)?;
        report_result(get_current_time(&args.city, Utc::now()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SentimentTool;

#[async_trait]
impl Tool for SentimentTool {
    fn name(&self) -> &str {
        "analyze_sentiment"
    }

    fn description(&self) -> &str {
        "Analyzes the sentiment of a given text."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to analyze the sentiment of."
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: TextArgs = parse_args(self.name(), params)?;
        Ok(ToolResult::json(json!({
            "status": "success",
            "sentiment": analyze_sentiment(&args.text),
        })))
    }
}
