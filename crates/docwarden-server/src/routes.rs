// ABOUTME: Route definitions for the mock user-info API.
// ABOUTME: Assembles handlers into one Axum Router with permissive CORS and request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/oidc-jwt-user-api", get(api::userinfo::get_user_info))
        .route("/dev-ui", get(api::dev_ui::callback))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use axum::body::Body;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn demo_state() -> SharedState {
        Arc::new(AppState::demo())
    }

    async fn send(app: Router, req: Request<Body>) -> (http::StatusCode, http::HeaderMap, serde_json::Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, headers, json)
    }

    fn userinfo_request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::get("/oidc-jwt-user-api");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, _, json) = send(
            create_router(demo_state()),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let (status, headers, json) = send(create_router(demo_state()), userinfo_request(None)).await;

        assert_eq!(status, 401);
        assert_eq!(headers["www-authenticate"], "Bearer");
        assert_eq!(
            json,
            serde_json::json!({
                "code": "unauthorized",
                "message": "Authorization header is missing"
            })
        );
    }

    #[tokio::test]
    async fn non_bearer_header_is_rejected() {
        let (status, _, json) = send(
            create_router(demo_state()),
            userinfo_request(Some("Basic dXNlcjpwdw==")),
        )
        .await;

        assert_eq!(status, 401);
        assert_eq!(json["code"], "unauthorized");
        assert_eq!(
            json["message"],
            "Invalid authorization format. Use Bearer {token}"
        );
    }

    #[tokio::test]
    async fn demo_profile_without_upstream() {
        let (status, _, json) = send(
            create_router(demo_state()),
            userinfo_request(Some("Bearer anything")),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(json["email"], "jordan@example.com");
        assert_eq!(json["email_verified"], true);
        assert!(json["updated_at"].is_i64());
    }

    #[tokio::test]
    async fn upstream_forbidden_maps_to_forbidden_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(
                    serde_json::json!({ "error": { "message": "Insufficient scope" } }),
                ),
            )
            .mount(&server)
            .await;

        let state = Arc::new(AppState::with_upstream(format!("{}/userinfo", server.uri())));
        let (status, headers, json) =
            send(create_router(state), userinfo_request(Some("Bearer t"))).await;

        assert_eq!(status, 403);
        assert!(headers.get("www-authenticate").is_none());
        assert_eq!(
            json,
            serde_json::json!({ "code": "forbidden", "message": "Insufficient scope" })
        );
    }

    #[tokio::test]
    async fn upstream_not_found_maps_to_error_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let state = Arc::new(AppState::with_upstream(format!("{}/userinfo", server.uri())));
        let (status, _, json) = send(create_router(state), userinfo_request(Some("Bearer t"))).await;

        assert_eq!(status, 404);
        assert_eq!(json["code"], "error");
        assert_eq!(json["message"], "Failed to retrieve user information");
    }

    #[tokio::test]
    async fn dev_ui_echoes_url() {
        let req = Request::get("/dev-ui?code=123")
            .header("host", "localhost:8000")
            .body(Body::empty())
            .unwrap();
        let (status, _, json) = send(create_router(demo_state()), req).await;

        assert_eq!(status, 200);
        assert_eq!(json, "http://localhost:8000/dev-ui?code=123");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let req = Request::get("/health")
            .header("origin", "https://docs.example.com")
            .body(Body::empty())
            .unwrap();
        let (_, headers, _) = send(create_router(demo_state()), req).await;

        assert!(headers.get("access-control-allow-origin").is_some());
    }
}
