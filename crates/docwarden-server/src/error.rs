// ABOUTME: API error type and its JSON rendering as `{code, message}` bodies.
// ABOUTME: 401 maps to `unauthorized`, 403 to `forbidden`, anything else to `error`.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authorization header is missing")]
    MissingAuthorization,

    #[error("Invalid authorization format. Use Bearer {{token}}")]
    InvalidAuthorizationFormat,

    /// Non-200 answer from the upstream userinfo endpoint.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Error connecting to UserInfo API: {0}")]
    Unreachable(String),

    #[error("Invalid user data: {0}")]
    InvalidUserData(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingAuthorization | ApiError::InvalidAuthorizationFormat => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Upstream { status, .. } => *status,
            ApiError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidUserData(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

pub fn error_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        _ => "error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("userinfo request failed: {}", self);
        } else {
            tracing::debug!("userinfo request rejected ({}): {}", status, self);
        }

        let body = ErrorBody {
            code: error_code(status).to_string(),
            message: self.to_string(),
        };
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_status() {
        assert_eq!(error_code(StatusCode::UNAUTHORIZED), "unauthorized");
        assert_eq!(error_code(StatusCode::FORBIDDEN), "forbidden");
        assert_eq!(error_code(StatusCode::NOT_FOUND), "error");
        assert_eq!(error_code(StatusCode::SERVICE_UNAVAILABLE), "error");
    }

    #[test]
    fn messages_match_wire_text() {
        assert_eq!(
            ApiError::InvalidAuthorizationFormat.to_string(),
            "Invalid authorization format. Use Bearer {token}"
        );
        assert_eq!(
            ApiError::Unreachable("refused".to_string()).to_string(),
            "Error connecting to UserInfo API: refused"
        );
    }

    #[test]
    fn unauthorized_carries_challenge_header() {
        let resp = ApiError::MissingAuthorization.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let resp = ApiError::Upstream {
            status: StatusCode::FORBIDDEN,
            message: "no scope".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
