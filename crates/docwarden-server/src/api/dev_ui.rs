// ABOUTME: GET /dev-ui callback that echoes the full request URL back as a JSON string.
// ABOUTME: Used as an OAuth redirect target while wiring up an agent's auth flow by hand.

use axum::Json;
use axum::http::{HeaderMap, Uri, header};

/// Rebuild the absolute URL the client asked for. Origin-form URIs are joined
/// with the Host header; absolute-form URIs are returned unchanged.
pub fn request_url(uri: &Uri, headers: &HeaderMap) -> String {
    if uri.scheme().is_some() {
        return uri.to_string();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("http://{}{}", host, path)
}

/// GET /dev-ui
pub async fn callback(uri: Uri, headers: HeaderMap) -> Json<String> {
    Json(request_url(&uri, &headers))
}
