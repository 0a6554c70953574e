//! Rider and driver sign-up forwarded to the backend as multipart.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::http::StatusCode;
use common::{flash, location, spawn_app};
use serde_json::json;
use tracksy_web::utils::flash::FlashKind;

const DRIVER_FIELDS: &[(&str, &str)] = &[
    ("name", "Rafi"),
    ("email", "rafi@tracksy.app"),
    ("phone", "01700000000"),
    ("password", "secret1"),
    ("model", "Axio"),
    ("year", "2018"),
    ("maxCapacity", "4"),
    ("type", "Car"),
    ("licenseNumber", "DHA-1234"),
];

#[tokio::test]
async fn driver_sign_up_sends_profile_defaults_and_photos_in_order() {
    let app = spawn_app().await;

    let response = app
        .post_multipart(
            "/register-driver",
            None,
            DRIVER_FIELDS,
            &[
                ("carPhoto", "car.png", b"car"),
                ("personPhoto", "me.png", b"me"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(flash(&response).unwrap().kind, FlashKind::Success);

    let sent = app.recorder.bodies("/auth/register-driver");
    assert_eq!(sent.len(), 1);
    let data = &sent[0]["data"];
    assert_eq!(data["email"], "rafi@tracksy.app");
    assert_eq!(data["licenseNumber"], "DHA-1234");
    assert_eq!(data["maxCapacity"], 4);
    assert_eq!(data["year"], 2018);
    assert_eq!(data["type"], "Car");
    assert_eq!(data["status"], "available");
    assert_eq!(data["rating"], 0);
    assert_eq!(data["acceptedRide"], 0);
    assert_eq!(data["location"], json!({"lat": 23.8103, "lang": 90.4125}));

    // Driver photo first, car second, whatever order the browser sent them in.
    assert_eq!(
        sent[0]["files"],
        json!([["files", "me.png"], ["files", "car.png"]])
    );
}

#[tokio::test]
async fn driver_sign_up_with_bad_capacity_stays_on_the_form() {
    let app = spawn_app().await;

    let mut fields = DRIVER_FIELDS.to_vec();
    fields.retain(|(name, _)| *name != "maxCapacity");
    fields.push(("maxCapacity", "0"));

    let response = app.post_multipart("/register-driver", None, &fields, &[]).await;

    assert_eq!(location(&response), "/register-driver");
    assert_eq!(flash(&response).unwrap().message, "Max capacity must be at least 1");
    assert!(app.recorder.bodies("/auth/register-driver").is_empty());
}

#[tokio::test]
async fn rider_sign_up_with_invalid_email_is_not_sent() {
    let app = spawn_app().await;

    let response = app
        .post_multipart(
            "/register-rider",
            None,
            &[
                ("name", "Sami"),
                ("email", "sami.tracksy.app"),
                ("phone", "01800000000"),
                ("password", "secret1"),
            ],
            &[],
        )
        .await;

    assert_eq!(location(&response), "/register-rider");
    let flash = flash(&response).unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "Please enter a valid email address");
    assert!(app.recorder.bodies("/auth/register-rider").is_empty());
}

#[tokio::test]
async fn rider_sign_up_refused_by_backend_keeps_the_form() {
    let app = spawn_app().await;

    let response = app
        .post_multipart(
            "/register-rider",
            None,
            &[
                ("name", "Sami"),
                ("email", "taken@tracksy.app"),
                ("phone", "01800000000"),
                ("password", "secret1"),
            ],
            &[("file", "me.png", b"me")],
        )
        .await;

    assert_eq!(location(&response), "/register-rider");
    assert_eq!(flash(&response).unwrap().message, "User already exists");

    let sent = app.recorder.bodies("/auth/register-rider");
    assert_eq!(sent[0]["data"]["name"], "Sami");
    assert_eq!(sent[0]["files"], json!([["file", "me.png"]]));
}
