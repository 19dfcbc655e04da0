// ABOUTME: Tool trait, result payloads, and the async registry that dispatches calls by name.
// ABOUTME: Tools receive JSON arguments and return JSON results, matching LLM function-calling shapes.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised while dispatching or validating a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Rejected(String),
}

/// Output of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Value,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn json(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::json(Value::String(text.into()))
    }

    /// Serialize any payload into a successful result.
    pub fn from_serialize<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::json(serde_json::to_value(payload)?))
    }

    /// A failed call, shaped the way the snippet tools report errors.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: serde_json::json!({
                "status": "error",
                "error_message": message.into(),
            }),
            is_error: true,
        }
    }
}

/// Common `status` + `report` / `error_message` payload used by lookup tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusReport {
    Success { report: String },
    Error { error_message: String },
}

impl StatusReport {
    pub fn is_success(&self) -> bool {
        matches!(self, StatusReport::Success { .. })
    }
}

/// A function exposed to an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn schema(&self) -> Value;

    /// Long-running tools return an interim status and finish out of band.
    fn is_long_running(&self) -> bool {
        false
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error>;
}

/// Decode a tool's JSON arguments into its typed argument struct.
pub fn parse_args<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T, ToolError> {
    serde_json::from_value(params).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

/// Callback around every registry call. `before` may rewrite the arguments
/// or answer in place of the tool; `after` may rewrite the result.
pub trait ToolHook: Send + Sync {
    fn before(&self, _tool: &str, _args: &mut Value) -> Option<ToolResult> {
        None
    }

    fn after(&self, _tool: &str, _args: &Value, _result: &mut ToolResult) {}
}

/// Public description of a registered tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    pub long_running: bool,
}

/// Name-keyed collection of tools, safe to share between tasks.
#[derive(Clone, Default)]
pub struct Registry {
    tools: Arc<RwLock<BTreeMap<String, Arc<dyn Tool>>>>,
    hooks: Arc<RwLock<Vec<Arc<dyn ToolHook>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous tool with the same name.
    pub async fn register<T: Tool + 'static>(&self, tool: T) {
        let name = tool.name().to_string();
        if self.tools.write().await.insert(name.clone(), Arc::new(tool)).is_some() {
            tracing::warn!("replaced existing tool registration: {}", name);
        }
    }

    /// Add a hook. Hooks run in the order they were added.
    pub async fn add_hook<H: ToolHook + 'static>(&self, hook: H) {
        self.hooks.write().await.push(Arc::new(hook));
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tools.read().await.len()
    }

    /// Descriptors for every registered tool, sorted by name.
    pub async fn list(&self) -> Vec<ToolDescriptor> {
        self.tools
            .read()
            .await
            .values()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.schema(),
                long_running: tool.is_long_running(),
            })
            .collect()
    }

    /// Invoke the tool registered under `name`, passing through every hook.
    pub async fn call(&self, name: &str, mut params: Value) -> Result<ToolResult, anyhow::Error> {
        let tool = self
            .get(name)
            .await
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let hooks = self.hooks.read().await.clone();

        for hook in &hooks {
            if let Some(result) = hook.before(name, &mut params) {
                tracing::info!("tool call: {}({}) answered by hook", name, params);
                return Ok(result);
            }
        }

        tracing::info!("tool call: {}({})", name, params);
        let mut result = tool.execute(params.clone()).await?;
        for hook in &hooks {
            hook.after(name, &params, &mut result);
        }
        tracing::info!("tool result: {} -> {}", name, result.content);
        Ok(result)
    }
}
