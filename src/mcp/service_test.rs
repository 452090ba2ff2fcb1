use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::config::{ProjectRoot, ToolSettings};

fn app(temp: &TempDir) -> Router {
    let settings = ToolSettings::new(ProjectRoot::resolve(temp.path()).unwrap());
    Router::new().nest_service(
        "/mcp",
        super::create_mcp_service(settings, CancellationToken::new()),
    )
}

#[tokio::test]
async fn test_paths_outside_mcp_are_not_served() {
    let temp = TempDir::new().unwrap();

    let response = app(&temp)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mcp_path_reaches_rmcp() {
    let temp = TempDir::new().unwrap();

    // a bare GET without a session is a protocol error, not a missing route
    let response = app(&temp)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/mcp")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::NOT_FOUND);
}
