// ABOUTME: Configuration loading and validation for the mock user-info server.
// ABOUTME: Reads DOCWARDEN_* environment variables and refuses non-loopback binds unless allowed.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DOCWARDEN_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("DOCWARDEN_BIND {0} is not a loopback address; set DOCWARDEN_ALLOW_REMOTE=true to expose the mock API")]
    RemoteNotAllowed(SocketAddr),

    #[error("DOCWARDEN_USERINFO_ENDPOINT must be an http(s) URL: {0}")]
    InvalidEndpoint(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub allow_remote: bool,
    /// Upstream OIDC userinfo endpoint. Without one the server answers with a demo profile.
    pub userinfo_endpoint: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allow_remote: false,
            userinfo_endpoint: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - DOCWARDEN_BIND: socket address to bind (default: 127.0.0.1:8000)
    /// - DOCWARDEN_ALLOW_REMOTE: allow a non-loopback bind (default: false)
    /// - DOCWARDEN_USERINFO_ENDPOINT: upstream userinfo URL (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_str = lookup("DOCWARDEN_BIND")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let allow_remote = lookup("DOCWARDEN_ALLOW_REMOTE")
            .map(|v| v == "true" || v == "1" || v == "yes")
            .unwrap_or(false);

        let userinfo_endpoint = lookup("DOCWARDEN_USERINFO_ENDPOINT").filter(|v| !v.is_empty());
        if let Some(ref endpoint) = userinfo_endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint(endpoint.clone()));
            }
        }

        if !bind.ip().is_loopback() && !allow_remote {
            return Err(ConfigError::RemoteNotAllowed(bind));
        }

        Ok(Self {
            bind,
            allow_remote,
            userinfo_endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn config_loads_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
    }

    #[test]
    fn config_rejects_remote_bind_without_opt_in() {
        let err = load(&[("DOCWARDEN_BIND", "0.0.0.0:8000")]).unwrap_err();
        assert!(
            err.to_string().contains("DOCWARDEN_ALLOW_REMOTE"),
            "error should mention the opt-in variable: {}",
            err
        );

        let config = load(&[
            ("DOCWARDEN_BIND", "0.0.0.0:8000"),
            ("DOCWARDEN_ALLOW_REMOTE", "true"),
        ])
        .unwrap();
        assert!(config.allow_remote);
    }

    #[test]
    fn config_rejects_bad_values() {
        assert!(matches!(
            load(&[("DOCWARDEN_BIND", "localhost")]),
            Err(ConfigError::InvalidBind(_))
        ));
        assert!(matches!(
            load(&[("DOCWARDEN_USERINFO_ENDPOINT", "ftp://idp/userinfo")]),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn config_reads_upstream_endpoint() {
        let config = load(&[(
            "DOCWARDEN_USERINFO_ENDPOINT",
            "https://idp.example.com/oauth2/v1/userinfo",
        )])
        .unwrap();
        assert_eq!(
            config.userinfo_endpoint.as_deref(),
            Some("https://idp.example.com/oauth2/v1/userinfo")
        );
    }
}
