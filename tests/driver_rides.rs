//! Driver ride list and transition buttons.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::http::StatusCode;
use common::{body_text, flash, location, spawn_app, token_for};
use serde_json::json;
use tracksy_web::utils::flash::FlashKind;

#[tokio::test]
async fn active_rides_offer_the_next_step_only() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app.get("/Driver/manage-ride", Some(&driver)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("/Driver/manage-ride/r-req/accept"));
    assert!(html.contains("/Driver/manage-ride/r-acc/start"));
    assert!(!html.contains("r-done"));
}

#[tokio::test]
async fn accepting_posts_ride_id_and_flashes() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app
        .post_form("/Driver/manage-ride/r-req/accept", Some(&driver), "")
        .await;

    assert_eq!(location(&response), "/Driver/manage-ride");
    let flash = flash(&response).unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
    assert_eq!(flash.message, "Ride accepted successfully");

    let sent = app.recorder.bodies("/ride/accept-ride");
    assert_eq!(sent, vec![serde_json::json!({"rideId": "r-req"})]);
}

#[tokio::test]
async fn drivers_cannot_cancel() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app
        .post_form("/Driver/manage-ride/r-req/cancel", Some(&driver), "")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn new_vehicle_is_forwarded_with_its_owner_and_image() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app
        .post_multipart(
            "/Driver/vehicle",
            Some(&driver),
            &[("model", "Axio"), ("year", "2018"), ("maxCapacity", "4"), ("type", "Car")],
            &[("vehicleImage", "axio.png", b"png")],
        )
        .await;

    assert_eq!(location(&response), "/Driver/profile");
    assert_eq!(flash(&response).unwrap().message, "Vehicle added successfully!");

    let sent = app.recorder.bodies("/user/driver/create/vehicle");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0]["fields"],
        json!({"owner": "driver-1", "model": "Axio", "year": "2018", "maxCapacity": "4", "type": "Car"})
    );
    assert_eq!(sent[0]["files"], json!([["vehicleImage", "axio.png"]]));
}

#[tokio::test]
async fn vehicle_without_image_is_not_sent() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app
        .post_multipart(
            "/Driver/vehicle",
            Some(&driver),
            &[("model", "Axio"), ("year", "2018"), ("maxCapacity", "4")],
            &[],
        )
        .await;

    assert_eq!(location(&response), "/Driver/profile");
    assert_eq!(flash(&response).unwrap().message, "Please upload a vehicle image!");
    assert!(app.recorder.bodies("/user/driver/create/vehicle").is_empty());
}

#[tokio::test]
async fn deleting_a_vehicle_calls_its_endpoint() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app
        .post_form("/Driver/vehicle/veh-7/delete", Some(&driver), "")
        .await;

    assert_eq!(location(&response), "/Driver/profile");
    assert_eq!(flash(&response).unwrap().kind, FlashKind::Success);
    assert_eq!(app.recorder.paths(), vec!["/user/driver/delete/vehicle/veh-7"]);
}

#[tokio::test]
async fn encoded_slashes_in_ids_never_reach_the_backend() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    for uri in [
        "/Driver/vehicle/..%2F..%2F..%2Fuser%2Fdelete%2Fvictim/delete",
        "/Driver/manage-ride/..%2Fget-all/accept",
        "/Driver/vehicle/veh%3Fx%3D1/delete",
    ] {
        let response = app.post_form(uri, Some(&driver), "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
    assert!(app.recorder.paths().is_empty());
}

#[tokio::test]
async fn last_possible_page_renders_without_next_link() {
    let app = spawn_app().await;
    let driver = token_for("Driver");

    let response = app
        .get("/Driver/complete-ride?page=4294967295", Some(&driver))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Page 4294967295 of 4294967295"));
    assert!(html.contains("page=4294967294"));
    assert!(!html.contains("page=4294967296"));
}
