//! Rider cancellation and rating.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{flash, location, spawn_app, token_for};
use serde_json::json;
use tracksy_web::utils::flash::FlashKind;

#[tokio::test]
async fn cancelling_posts_ride_id() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app
        .post_form("/Rider/manage-rider/r-req/cancel", Some(&rider), "")
        .await;

    assert_eq!(location(&response), "/Rider/manage-rider");
    assert_eq!(flash(&response).unwrap().message, "Ride cancelled");
    assert_eq!(
        app.recorder.bodies("/ride/cancel-ride"),
        vec![json!({"rideId": "r-req"})]
    );
}

#[tokio::test]
async fn rating_sends_ride_driver_score_and_comment() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app
        .post_form(
            "/Rider/manage-rider/r-done/rate",
            Some(&rider),
            "to=driver-9&score=4&comment=++Smooth+ride++",
        )
        .await;

    assert_eq!(location(&response), "/Rider/manage-rider/r-done");
    let flash = flash(&response).unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
    assert_eq!(flash.message, "Rating created");

    assert_eq!(
        app.recorder.bodies("/rating/create"),
        vec![json!({"ride": "r-done", "to": "driver-9", "score": 4, "comment": "Smooth ride"})]
    );
}

#[tokio::test]
async fn non_numeric_score_flashes_instead_of_failing() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app
        .post_form("/Rider/manage-rider/r-done/rate", Some(&rider), "to=driver-9&score=five")
        .await;

    assert_eq!(location(&response), "/Rider/manage-rider/r-done");
    let flash = flash(&response).unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "Please choose a score");
    assert!(app.recorder.bodies("/rating/create").is_empty());
}

#[tokio::test]
async fn out_of_range_score_is_refused() {
    let app = spawn_app().await;
    let rider = token_for("Rider");

    let response = app
        .post_form("/Rider/manage-rider/r-done/rate", Some(&rider), "to=driver-9&score=9")
        .await;

    assert_eq!(flash(&response).unwrap().message, "Score must be between 1 and 5");
    assert!(app.recorder.bodies("/rating/create").is_empty());
}
