// ABOUTME: Prime number check tool: filters a list of integers down to its primes.
// ABOUTME: Uses trial division up to the square root and formats a one-line summary.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::tool::{Tool, ToolResult, parse_args};

/// Trial division primality test. Anything at or below 1 is not prime.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    let mut i = 2;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Summarize which of `nums` are prime, keeping input order.
///
/// `[2, 3, 4, 5, 10]` yields `"2, 3, 5 are prime numbers."`.
pub fn check_prime(nums: &[i64]) -> String {
    let primes: Vec<String> = nums
        .iter()
        .copied()
        .filter(|n| is_prime(*n))
        .map(|n| n.to_string())
        .collect();

    if primes.is_empty() {
        "No prime numbers found.".to_string()
    } else {
        format!("{} are prime numbers.", primes.join(", "))
    }
}

/// Accept integers, integral floats, and numeric strings the way a model
/// tends to send them. Fractional or out-of-range floats are rejected.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integral_f64(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

#[derive(Debug, Deserialize)]
struct CheckPrimeArgs {
    nums: Vec<Value>,
}

/// Tool wrapper around [`check_prime`].
#[derive(Debug, Clone, Default)]
pub struct CheckPrimeTool;

#[async_trait]
impl Tool for CheckPrimeTool {
    fn name(&self) -> &str {
        "check_prime"
    }

    fn description(&self) -> &str {
        "Return a formatted string indicating which numbers are prime."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "nums": {
                    "type": "array",
                    "items": { "type": "integer" },
                    "description": "The numbers to check."
                }
            },
            "required": ["nums"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: CheckPrimeArgs = parse_args(self.name(), params)?;
        let mut nums = Vec::with_capacity(args.nums.len());
        for raw in &args.nums {
            match coerce_int(raw) {
                Some(n) => nums.push(n),
                None => return Ok(ToolResult::error(format!("'{}' is not an integer.", raw))),
            }
        }
        Ok(ToolResult::text(check_prime(&nums)))
    }
}
