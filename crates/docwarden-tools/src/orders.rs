// ABOUTME: Order status lookup tool for the customer-support agent.
// ABOUTME: Queries an order backend trait; the bundled backend knows a single demo order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::tool::{Tool, ToolResult, parse_args};

/// Shipping state of a known order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub state: String,
    pub tracking_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OrderStatus {
    Success { order: Order },
    Error { error_message: String },
}

/// Where order details come from.
pub trait OrderBackend: Send + Sync {
    fn fetch(&self, order_id: &str) -> Option<Order>;
}

/// In-memory backend keyed by order id.
#[derive(Debug, Clone, Default)]
pub struct StaticOrders {
    orders: HashMap<String, Order>,
}

impl StaticOrders {
    pub fn with_order(mut self, order_id: impl Into<String>, state: &str, tracking: &str) -> Self {
        self.orders.insert(
            order_id.into(),
            Order {
                state: state.to_string(),
                tracking_number: tracking.to_string(),
            },
        );
        self
    }

    /// Backend containing the demo order `12345`.
    pub fn demo() -> Self {
        Self::default().with_order("12345", "shipped", "1Z9...")
    }
}

impl OrderBackend for StaticOrders {
    fn fetch(&self, order_id: &str) -> Option<Order> {
        self.orders.get(order_id).cloned()
    }
}

pub fn lookup_order_status(backend: &dyn OrderBackend, order_id: &str) -> OrderStatus {
    match backend.fetch(order_id) {
        Some(order) => OrderStatus::Success { order },
        None => OrderStatus::Error {
            error_message: format!("Order ID {} not found.", order_id),
        },
    }
}

#[derive(Debug, Deserialize)]
struct OrderArgs {
    order_id: String,
}

#[derive(Clone)]
pub struct OrderStatusTool {
    pub(crate) backend: Arc<dyn OrderBackend>,
}

impl OrderStatusTool {
    pub fn new(backend: Arc<dyn OrderBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for OrderStatusTool {
    fn name(&self) -> &str {
        "lookup_order_status"
    }

    fn description(&self) -> &str {
        "Fetches the current status of a customer's order using its ID."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "order_id": {
                    "type": "string",
                    "description": "The ID of the order to look up."
                }
            },
            "required": ["order_id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: OrderArgs = parse_args(self.name(), params)?;
        let status = lookup_order_status(self.backend.as_ref(), &args.order_id);
        let is_error = matches!(status, OrderStatus::Error { .. });
        let mut result = ToolResult::from_serialize(&status)?;
        result.is_error = is_error;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_order_is_shipped() {
        let backend = StaticOrders::demo();
        assert_eq!(
            lookup_order_status(&backend, "12345"),
            OrderStatus::Success {
                order: Order {
                    state: "shipped".to_string(),
                    tracking_number: "1Z9...".to_string(),
                }
            }
        );
    }

    #[test]
    fn unknown_order_reports_id() {
        let backend = StaticOrders::demo();
        assert_eq!(
            lookup_order_status(&backend, "999"),
            OrderStatus::Error {
                error_message: "Order ID 999 not found.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn tool_serializes_nested_order() {
        let tool = OrderStatusTool::new(Arc::new(StaticOrders::demo()));
        let out = tool.execute(json!({ "order_id": "12345" })).await.unwrap();
        assert_eq!(
            out.content,
            json!({
                "status": "success",
                "order": { "state": "shipped", "tracking_number": "1Z9..." }
            })
        );
    }
}
