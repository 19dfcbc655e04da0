// ABOUTME: Reimbursement tools: a long-running approval request and the final payout call.
// ABOUTME: Approval returns a pending ticket immediately; the decision arrives outside the call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use ulid::Ulid;

use crate::tool::{Tool, ToolResult, parse_args};

/// Pending approval ticket handed back to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalTicket {
    pub status: String,
    pub approver: String,
    pub purpose: String,
    pub amount: f64,
    #[serde(rename = "ticket-id")]
    pub ticket_id: String,
}

pub fn ask_for_approval(approver: &str, purpose: &str, amount: f64) -> ApprovalTicket {
    ApprovalTicket {
        status: "pending".to_string(),
        approver: approver.to_string(),
        purpose: purpose.to_string(),
        amount,
        ticket_id: format!("approval-ticket-{}", Ulid::new()),
    }
}

#[derive(Debug, Deserialize)]
struct ReimbursementArgs {
    purpose: String,
    amount: f64,
}

fn reimbursement_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "purpose": {
                "type": "string",
                "description": "The purpose of the reimbursement."
            },
            "amount": {
                "type": "number",
                "description": "The amount to reimburse."
            }
        },
        "required": ["purpose", "amount"]
    })
}

/// Long-running tool that files an approval request with `approver`.
#[derive(Debug, Clone)]
pub struct ApprovalTool {
    pub(crate) approver: String,
}

impl ApprovalTool {
    pub fn new(approver: impl Into<String>) -> Self {
        Self {
            approver: approver.into(),
        }
    }
}

#[async_trait]
impl Tool for ApprovalTool {
    fn name(&self) -> &str {
        "ask_for_approval"
    }

    fn description(&self) -> &str {
        "Ask for approval for the reimbursement."
    }

    fn schema(&self) -> Value {
        reimbursement_schema()
    }

    fn is_long_running(&self) -> bool {
        true
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: ReimbursementArgs = parse_args(self.name(), params)?;
        let ticket = ask_for_approval(&self.approver, &args.purpose, args.amount);
        tracing::info!("filed {} for {:.2} ({})", ticket.ticket_id, ticket.amount, ticket.purpose);
        Ok(ToolResult::from_serialize(&ticket)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReimburseTool;

#[async_trait]
impl Tool for ReimburseTool {
    fn name(&self) -> &str {
        "reimburse"
    }

    fn description(&self) -> &str {
        "Reimburse the amount of money to the employee."
    }

    fn schema(&self) -> Value {
        reimbursement_schema()
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: ReimbursementArgs = parse_args(self.name(), params)?;
        tracing::info!("reimbursing {:.2} for {}", args.amount, args.purpose);
        Ok(ToolResult::json(json!({ "status": "ok" })))
    }
}
