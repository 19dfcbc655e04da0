// ABOUTME: Shared key/value session state that tools read and write by key.
// ABOUTME: Values are JSON so tools can store maps, lists, or scalars under scoped keys like `user:preferences`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// Session state handle. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    values: Arc<RwLock<Map<String, Value>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.values.read().await.get(key).cloned()
    }

    pub async fn set(&self, key: impl Into<String>, value: Value) {
        self.values.write().await.insert(key.into(), value);
    }

    /// Read-modify-write a single key under one lock. Returns the stored value.
    pub async fn update<F>(&self, key: &str, f: F) -> Value
    where
        F: FnOnce(Option<Value>) -> Value,
    {
        let mut values = self.values.write().await;
        let next = f(values.remove(key));
        values.insert(key.to_string(), next.clone());
        next
    }
}
