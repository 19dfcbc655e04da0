// ABOUTME: Mock OIDC user-info HTTP API used while developing authenticated agent tools.
// ABOUTME: Axum router with shared state, env-driven config, and a serve loop for the CLI.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

pub use app_state::{AppState, SharedState, UserInfoSource};
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::create_router;

/// Bind `config.bind` and serve the API until the process is stopped.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(&config));
    match &state.userinfo {
        UserInfoSource::Upstream(endpoint) => {
            tracing::info!("forwarding bearer tokens to {}", endpoint)
        }
        UserInfoSource::Demo(_) => {
            tracing::info!("no DOCWARDEN_USERINFO_ENDPOINT set; serving the demo profile")
        }
    }

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("user-info API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await
}
