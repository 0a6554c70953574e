//! Dashboard access by role, through the full router.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::http::StatusCode;
use common::{location, spawn_app, token_for};

#[tokio::test]
async fn signed_out_dashboard_visit_goes_to_login() {
    let app = spawn_app().await;

    let response = app.get("/Admin/state", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?redirect="));
    assert!(location(&response).contains("Admin"));
}

#[tokio::test]
async fn signed_out_visitor_reaches_auth_and_public_pages() {
    let app = spawn_app().await;

    for path in ["/", "/about", "/contact", "/login", "/register", "/register-rider"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn wrong_role_is_sent_home() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app.get("/Driver/manage-ride", Some(&rider)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn signed_in_user_is_kept_off_login() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app.get("/login", Some(&driver)).await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn garbage_cookie_counts_as_signed_out() {
    let app = spawn_app().await;

    let response = app.get("/Rider/profile", Some("not-a-token")).await;
    assert!(location(&response).starts_with("/login?redirect="));
}

#[tokio::test]
async fn unknown_pages_render_not_found() {
    let app = spawn_app().await;

    let response = app.get("/no-such-page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app().await;

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_text(response).await, r#"{"status":"ok"}"#);
}
