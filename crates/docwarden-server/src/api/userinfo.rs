// ABOUTME: GET /oidc-jwt-user-api handler and the OIDC UserInfo profile model.
// ABOUTME: Validates the bearer header, then proxies to the upstream userinfo endpoint or serves a demo profile.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app_state::{SharedState, UserInfoSource};
use crate::error::ApiError;

const DEFAULT_UPSTREAM_MESSAGE: &str = "Failed to retrieve user information";

/// Profile returned by an OIDC userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    pub name: String,
    pub locale: String,
    pub email: String,
    pub preferred_username: String,
    pub given_name: String,
    pub family_name: String,
    pub zoneinfo: String,
    /// Unix seconds.
    pub updated_at: i64,
    pub email_verified: bool,
}

impl UserInfo {
    pub fn demo() -> Self {
        Self {
            sub: "00u1demo2user3id".to_string(),
            name: "Jordan Example".to_string(),
            locale: "en-US".to_string(),
            email: "jordan@example.com".to_string(),
            preferred_username: "jordan@example.com".to_string(),
            given_name: "Jordan".to_string(),
            family_name: "Example".to_string(),
            zoneinfo: "America/Los_Angeles".to_string(),
            updated_at: 1_735_689_600,
            email_verified: true,
        }
    }

    /// Decode and validate a profile from a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, String> {
        let info: UserInfo = serde_json::from_slice(body).map_err(|e| e.to_string())?;
        if !looks_like_email(&info.email) {
            return Err(format!("'{}' is not a valid email address", info.email));
        }
        Ok(info)
    }
}

/// One `@`, a non-empty local part, and a dotted domain with no empty labels.
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// GET /oidc-jwt-user-api
pub async fn get_user_info(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<UserInfo>, ApiError> {
    let authorization = match headers.get(header::AUTHORIZATION) {
        None => return Err(ApiError::MissingAuthorization),
        Some(value) if value.is_empty() => return Err(ApiError::MissingAuthorization),
        Some(value) => value
            .to_str()
            .map_err(|_| ApiError::InvalidAuthorizationFormat)?,
    };
    if !authorization.starts_with("Bearer ") {
        return Err(ApiError::InvalidAuthorizationFormat);
    }

    match &state.userinfo {
        UserInfoSource::Demo(profile) => Ok(Json(profile.clone())),
        UserInfoSource::Upstream(endpoint) => {
            fetch_user_info(&state.http, endpoint, authorization)
                .await
                .map(Json)
        }
    }
}

/// Forward `authorization` to the upstream endpoint and validate the profile it returns.
pub async fn fetch_user_info(
    client: &reqwest::Client,
    endpoint: &str,
    authorization: &str,
) -> Result<UserInfo, ApiError> {
    let response = client
        .get(endpoint)
        .header(header::AUTHORIZATION, authorization)
        .send()
        .await
        .map_err(|e| ApiError::Unreachable(e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| upstream_message(&body))
            .unwrap_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string());
        return Err(ApiError::Upstream { status, message });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Unreachable(e.to_string()))?;
    UserInfo::from_json(&body).map_err(ApiError::InvalidUserData)
}

/// `error.message` from an upstream error body, when it is a string.
fn upstream_message(body: &Value) -> Option<String> {
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile_json() -> Value {
        serde_json::to_value(UserInfo::demo()).unwrap()
    }

    async fn upstream(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth2/v1/userinfo"))
            .and(header_eq("authorization", "Bearer good-token"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    async fn fetch(server: &MockServer) -> Result<UserInfo, ApiError> {
        let endpoint = format!("{}/oauth2/v1/userinfo", server.uri());
        fetch_user_info(&reqwest::Client::new(), &endpoint, "Bearer good-token").await
    }

    #[test]
    fn email_check() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last+tag@mail.example.org"));
        assert!(!looks_like_email("no-at-sign"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("a@localhost"));
        assert!(!looks_like_email("a@b@c.com"));
        assert!(!looks_like_email("a@example..com"));
        assert!(!looks_like_email("a b@example.com"));
    }

    #[test]
    fn profile_requires_every_field() {
        let mut body = profile_json();
        body.as_object_mut().unwrap().remove("zoneinfo");
        let err = UserInfo::from_json(body.to_string().as_bytes()).unwrap_err();
        assert!(err.contains("zoneinfo"), "{}", err);
    }

    #[tokio::test]
    async fn upstream_profile_is_returned() {
        let server = upstream(ResponseTemplate::new(200).set_body_json(profile_json())).await;
        assert_eq!(fetch(&server).await.unwrap(), UserInfo::demo());
    }

    #[tokio::test]
    async fn upstream_401_keeps_its_message() {
        let server = upstream(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": { "message": "Token expired" } })),
        )
        .await;

        match fetch(&server).await.unwrap_err() {
            ApiError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Token expired");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn upstream_failure_without_message_uses_default() {
        let server = upstream(ResponseTemplate::new(403).set_body_string("nope")).await;

        let err = fetch(&server).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), DEFAULT_UPSTREAM_MESSAGE);
    }

    #[tokio::test]
    async fn upstream_status_passes_through() {
        let server = upstream(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "flat string" })),
        )
        .await;

        let err = fetch(&server).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), DEFAULT_UPSTREAM_MESSAGE);
    }

    #[tokio::test]
    async fn malformed_profile_is_bad_request() {
        let mut body = profile_json();
        body["email"] = json!("not-an-email");
        let server = upstream(ResponseTemplate::new(200).set_body_json(body)).await;

        let err = fetch(&server).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid user data: "));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_503() {
        // Grab a free port and release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let endpoint = format!("http://127.0.0.1:{}/oauth2/v1/userinfo", port);

        let err = fetch_user_info(&reqwest::Client::new(), &endpoint, "Bearer good-token")
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().starts_with("Error connecting to UserInfo API: "));
    }
}
