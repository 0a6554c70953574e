//! Booking page and ride creation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::http::StatusCode;
use common::{body_text, flash, location, spawn_app, token_for};
use tracksy_web::utils::flash::FlashKind;

const POINTS: &str = "start_lat=23.81&start_lng=90.41&end_lat=23.87&end_lng=90.40";

#[tokio::test]
async fn page_shows_addresses_and_driving_distance() {
    let app = spawn_app().await;

    let response = app.get(&format!("/bookRide?{POINTS}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Road near 23.81, Dhaka"));
    assert!(html.contains("Road near 23.87, Dhaka"));
    assert!(html.contains("7.20 km"));
}

#[tokio::test]
async fn address_falls_back_to_coordinates() {
    let app = spawn_app().await;

    let response = app
        .get("/bookRide?start_lat=0&start_lng=90.4125", None)
        .await;
    let html = body_text(response).await;
    assert!(html.contains("0.0000, 90.4125"));
}

#[tokio::test]
async fn blank_promo_code_is_not_sent() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app
        .post_form("/bookRide", Some(&rider), &format!("{POINTS}&promo_code=++"))
        .await;

    assert_eq!(location(&response), "/bookRide");
    assert_eq!(flash(&response).unwrap().kind, FlashKind::Success);

    let sent = app.recorder.bodies("/ride/create");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].get("promoCode").is_none());
    assert_eq!(sent[0]["rider"], "rider-1");
    assert_eq!(sent[0]["startRide"]["lang"], 90.41);
}

#[tokio::test]
async fn rejected_promo_keeps_the_form() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app
        .post_form("/bookRide", Some(&rider), &format!("{POINTS}&promo_code=EXPIRED"))
        .await;

    let flash = flash(&response).unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "Invalid promo code");
    assert!(location(&response).contains("promo_code=EXPIRED"));
    assert_eq!(app.recorder.bodies("/ride/create")[0]["promoCode"], "EXPIRED");
}

#[tokio::test]
async fn missing_destination_is_caught_before_backend() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app
        .post_form("/bookRide", Some(&rider), "start_lat=23.81&start_lng=90.41")
        .await;

    assert_eq!(flash(&response).unwrap().kind, FlashKind::Error);
    assert!(app.recorder.bodies("/ride/create").is_empty());
}

#[tokio::test]
async fn signed_out_booking_goes_to_login() {
    let app = spawn_app().await;

    let response = app.post_form("/bookRide", None, POINTS).await;
    assert!(location(&response).starts_with("/login?redirect="));
}

#[tokio::test]
async fn route_api_returns_leaflet_path() {
    let app = spawn_app().await;

    let response = app
        .get(
            "/api/geo/route?start_lat=23.81&start_lng=90.41&end_lat=23.87&end_lng=90.40",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["data"]["path"][0][0], 23.81);
}

#[tokio::test]
async fn geo_api_answers_bad_coordinates_with_json() {
    let app = spawn_app().await;

    for uri in [
        "/api/geo/reverse?lat=abc&lng=90.41",
        "/api/geo/reverse?lat=23.81&lat=23.82&lng=90.41",
        "/api/geo/route?start_lat=23.81&start_lng=90.41&end_lat=north&end_lng=90.40",
    ] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}
