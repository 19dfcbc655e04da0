// ABOUTME: Stock price tool that quotes a random price for any ticker.
// ABOUTME: Stands in for a market data API behind a function tool.

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::tool::{Tool, ToolResult, parse_args};

/// A price between $0.00 and $1000.00, formatted with two decimals.
pub fn quote_price<R: Rng + ?Sized>(rng: &mut R) -> String {
    let cents: u32 = rng.gen_range(0..=100_000);
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[derive(Debug, Deserialize)]
struct TickerArgs {
    ticker: String,
}

#[derive(Debug, Clone, Default)]
pub struct StockPriceTool;

#[async_trait]
impl Tool for StockPriceTool {
    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Gets the current price of a stock."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "The stock ticker symbol to look up."
                }
            },
            "required": ["ticker"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: TickerArgs = parse_args(self.name(), params)?;
        let price = quote_price(&mut rand::thread_rng());
        tracing::debug!("quoted {} at {}", args.ticker, price);
        Ok(ToolResult::json(json!({ "price": price })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn prices_have_two_decimals() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let price = quote_price(&mut rng);
            let (dollars, cents) = price.trim_start_matches('$').split_once('.').unwrap();
            assert!(price.starts_with('$'));
            assert_eq!(cents.len(), 2);
            assert!(dollars.parse::<u32>().unwrap() <= 1000);
        }
    }

    #[tokio::test]
    async fn tool_returns_price_field() {
        let out = StockPriceTool
            .execute(json!({ "ticker": "GOOG" }))
            .await
            .unwrap();
        assert!(out.content["price"].as_str().unwrap().starts_with('$'));
    }
}
