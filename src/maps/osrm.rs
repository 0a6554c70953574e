use serde::{Deserialize, Serialize};

use crate::maps::GeoClient;
use crate::utils::geo::LatLng;

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

/// Driving route between two points as drawn on the booking map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
    /// `[lat, lng]` pairs, the order Leaflet polylines take.
    pub path: Vec<[f64; 2]>,
}

impl GeoClient {
    /// Driving distance in kilometres; `None` whenever OSRM cannot answer.
    pub async fn driving_distance_km(&self, from: LatLng, to: LatLng) -> Option<f64> {
        self.fetch_route(from, to, &[("overview", "false")])
            .await
            .map(|route| route.distance_km)
    }

    pub async fn driving_route(&self, from: LatLng, to: LatLng) -> Option<RouteSummary> {
        self.fetch_route(from, to, &[("overview", "full"), ("geometries", "geojson")])
            .await
    }

    async fn fetch_route(
        &self,
        from: LatLng,
        to: LatLng,
        query: &[(&str, &str)],
    ) -> Option<RouteSummary> {
        let url = format!(
            "{}/route/v1/driving/{};{}",
            self.osrm_url,
            from.osrm_pair(),
            to.osrm_pair()
        );

        let response = match self.http.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Route lookup failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Route lookup rejected");
            return None;
        }

        match response.bytes().await {
            Ok(body) => parse_route(&body),
            Err(e) => {
                tracing::warn!(error = %e, "Route body unreadable");
                None
            }
        }
    }
}

fn parse_route(body: &[u8]) -> Option<RouteSummary> {
    let parsed: RouteResponse = serde_json::from_slice(body).ok()?;
    if parsed.code != "Ok" {
        tracing::warn!(code = %parsed.code, "OSRM returned no route");
        return None;
    }

    let route = parsed.routes.into_iter().next()?;
    let path = route
        .geometry
        .map(|g| g.coordinates.into_iter().map(|[lng, lat]| [lat, lng]).collect())
        .unwrap_or_default();

    Some(RouteSummary {
        distance_km: route.distance / 1000.0,
        duration_min: route.duration / 60.0,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_metres_and_seconds() {
        let body = br#"{"code": "Ok", "routes": [{"distance": 7250.0, "duration": 900.0}]}"#;
        let route = parse_route(body).unwrap();
        assert_eq!(route.distance_km, 7.25);
        assert_eq!(route.duration_min, 15.0);
        assert!(route.path.is_empty());
    }

    #[test]
    fn geometry_is_flipped_to_lat_lng() {
        let body = br#"{
            "code": "Ok",
            "routes": [{
                "distance": 10.0, "duration": 1.0,
                "geometry": {"type": "LineString", "coordinates": [[90.41, 23.81], [90.40, 23.87]]}
            }]
        }"#;
        let route = parse_route(body).unwrap();
        assert_eq!(route.path, vec![[23.81, 90.41], [23.87, 90.40]]);
    }

    #[test]
    fn no_route_is_none() {
        assert!(parse_route(br#"{"code": "NoRoute", "routes": []}"#).is_none());
        assert!(parse_route(br#"{"code": "Ok", "routes": []}"#).is_none());
        assert!(parse_route(b"<html>").is_none());
    }
}
