// ABOUTME: End-to-end smoke test across the docwarden crates.
// ABOUTME: Builds a docs tree in a temp dir, runs both reports and the catalog, then exercises tools and the API.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use chrono::{DateTime, FixedOffset, TimeDelta};
use docwarden_core::{CatalogOptions, DocsLayout, HealthPolicy, render_catalog};
use docwarden_server::{AppState, create_router};
use docwarden_tools::{Route, SessionState, UserContent, build_registry};
use http::Request;
use tower::ServiceExt;

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2026-10-19T09:30:00+00:00").unwrap()
}

/// Helper to extract JSON body from a response.
async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn write_docs(root: &Path) {
    fs::create_dir_all(root.join("docs/integrations")).unwrap();
    fs::write(root.join("docs/index.md"), "# Agent Development Kit\n").unwrap();
    fs::write(
        root.join("docs/get-started.md"),
        "---\nversion: \"1.2.0\"\n---\n# Get started\n",
    )
    .unwrap();
    fs::write(
        root.join("docs/integrations/bigquery.md"),
        "---\ncatalog_title: BigQuery\ncatalog_description: Query & analyze warehouse data\ncatalog_icon: /adk-docs/integrations/assets/bigquery.png\n---\n# BigQuery tools\n",
    )
    .unwrap();
    fs::write(
        root.join("docs/integrations/code-exec.md"),
        "# Code Execution\n\nRun snippets in a sandbox.\n",
    )
    .unwrap();
    fs::write(root.join("docs/integrations/index.md"), "# Integrations\n").unwrap();
}

#[tokio::test]
async fn smoke_test_docs_tools_and_api() {
    // 1. Docs tree with one stale page, one fresh page and one untracked page
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write_docs(root);

    let dates = |path: &Path| {
        let path = path.to_string_lossy();
        if path.ends_with("bigquery.md") {
            Some(now() - TimeDelta::days(120))
        } else if path.ends_with("index.md") {
            None
        } else {
            Some(now() - TimeDelta::days(3))
        }
    };

    // 2. Health report marks the stale page and fails the run
    let layout = DocsLayout::new(root);
    let health = layout
        .run_health(&dates, now(), HealthPolicy::default())
        .unwrap();
    assert_eq!(health.total_docs, 5);
    assert_eq!(health.total_stale, 1);
    assert_eq!(health.unknown, 2);
    assert_eq!(health.exit_code(), 1);

    // 3. Version report lands in the same file
    let versions = layout.run_versions().unwrap();
    assert_eq!(versions.by_version["1.2.0"].len(), 1);

    let report = fs::read_to_string(layout.report_path()).unwrap();
    assert!(report.contains("docs/integrations/bigquery.md"));
    assert!(report.contains("<!-- END_DOCS_HEALTH_REPORT -->"));
    assert!(report.contains("## Version 1.2.0"));

    // 4. Catalog renders one card per non-index integration page
    let options = CatalogOptions::new(root.join("docs"));
    let html = render_catalog(&options, "integrations/*.md").unwrap();
    assert_eq!(html.matches("class=\"tool-card\"").count(), 2);
    assert!(html.contains("<h3>BigQuery</h3>"));
    assert!(html.contains("Query &amp; analyze warehouse data"));
    assert!(html.contains("<h3>Code Execution</h3>"));
    assert!(html.contains("/adk-docs/integrations/code-exec/"));

    // 5. Routed tool call through the registry
    let registry = build_registry(SessionState::new()).await;
    let route = Route::for_message(Some(&UserContent::from_text("Roll a 6-sided die")));
    assert_eq!(route, Route::Roll);
    let rolled = registry
        .call(route.tool_name(), serde_json::json!({ "sides": 6 }))
        .await
        .unwrap();
    let value = rolled.content["result"].as_u64().unwrap();
    assert!((1..=6).contains(&value));

    // 6. Mock user-info API (demo profile, no upstream)
    let state = Arc::new(AppState::demo());
    let resp = create_router(Arc::clone(&state))
        .oneshot(
            Request::get("/oidc-jwt-user-api")
                .header("authorization", "Bearer smoke")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json = json_body(resp).await;
    assert!(json["sub"].is_string());

    let resp = create_router(state)
        .oneshot(Request::get("/oidc-jwt-user-api").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    assert_eq!(json_body(resp).await["code"], "unauthorized");
}
