// ABOUTME: Shared application state for the mock user-info server.
// ABOUTME: Holds the outbound HTTP client and where profiles come from (upstream or demo).

use std::sync::Arc;

use crate::api::userinfo::UserInfo;
use crate::config::ServerConfig;

/// Where `/oidc-jwt-user-api` gets its profile from.
#[derive(Debug, Clone)]
pub enum UserInfoSource {
    /// Forward the caller's bearer token to this userinfo URL.
    Upstream(String),
    /// Answer every authorized request with a fixed profile.
    Demo(UserInfo),
}

/// Shared application state accessible by all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub userinfo: UserInfoSource,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        match &config.userinfo_endpoint {
            Some(endpoint) => Self::with_upstream(endpoint.clone()),
            None => Self::demo(),
        }
    }

    pub fn with_upstream(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            userinfo: UserInfoSource::Upstream(endpoint.into()),
        }
    }

    pub fn demo() -> Self {
        Self {
            http: reqwest::Client::new(),
            userinfo: UserInfoSource::Demo(UserInfo::demo()),
        }
    }
}
