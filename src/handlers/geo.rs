use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::utils::geo::LatLng;
use crate::utils::serde_ext::lenient_f64;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start_lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub end_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub end_lng: Option<f64>,
}

fn invalid(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": message })),
    )
}

/// Address for a map click. Always succeeds for a valid point.
pub async fn reverse(
    State(state): State<AppState>,
    query: Result<Query<PointQuery>, QueryRejection>,
) -> (StatusCode, Json<Value>) {
    let Ok(Query(query)) = query else {
        return invalid("lat and lng must be valid coordinates");
    };
    let Some(point) = LatLng::from_parts(query.lat, query.lng) else {
        return invalid("lat and lng must be valid coordinates");
    };

    let address = state.geo.reverse_geocode(point).await;
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Address resolved",
            "data": { "lat": point.lat, "lng": point.lng, "address": address },
        })),
    )
}

/// Driving route between the two booking points; `data` is null when OSRM has none.
pub async fn route(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> (StatusCode, Json<Value>) {
    let Ok(Query(query)) = query else {
        return invalid("Both pickup and destination are required");
    };
    let start = LatLng::from_parts(query.start_lat, query.start_lng);
    let end = LatLng::from_parts(query.end_lat, query.end_lng);
    let (Some(start), Some(end)) = (start, end) else {
        return invalid("Both pickup and destination are required");
    };

    let route = state.geo.driving_route(start, end).await;
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": if route.is_some() { "Route found" } else { "No route available" },
            "data": route,
        })),
    )
}
