// ABOUTME: Snippet tools exposed to agents, the registry that dispatches them, and intent routing.
// ABOUTME: build_registry wires every bundled tool against one shared session state.

pub mod capital;
pub mod dice;
pub mod hooks;
pub mod market;
pub mod orders;
pub mod preferences;
pub mod prime;
pub mod reimbursement;
pub mod routing;
pub mod state;
pub mod tool;
pub mod weather;

use std::sync::Arc;

pub use hooks::install_capital_hooks;
pub use routing::{Route, UserContent, is_roll_request};
pub use state::SessionState;
pub use tool::{
    Registry, StatusReport, Tool, ToolDescriptor, ToolError, ToolHook, ToolResult,
};

/// Approver named on reimbursement tickets unless the caller picks one.
pub const DEFAULT_APPROVER: &str = "finance-manager";

/// Registry holding every bundled tool.
pub async fn build_registry(state: SessionState) -> Registry {
    let registry = Registry::new();
    registry.register(prime::CheckPrimeTool).await;
    registry.register(dice::RollDieTool).await;
    registry.register(capital::CapitalCityTool).await;
    registry.register(weather::WeatherTool).await;
    registry.register(weather::CurrentTimeTool).await;
    registry.register(weather::SentimentTool).await;
    registry
        .register(orders::OrderStatusTool::new(Arc::new(
            orders::StaticOrders::demo(),
        )))
        .await;
    registry
        .register(preferences::UserPreferenceTool::new(state))
        .await;
    registry.register(market::StockPriceTool).await;
    registry
        .register(reimbursement::ApprovalTool::new(DEFAULT_APPROVER))
        .await;
    registry.register(reimbursement::ReimburseTool).await;
    registry
}
