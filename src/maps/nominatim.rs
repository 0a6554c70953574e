use serde::Deserialize;

use crate::maps::GeoClient;
use crate::utils::geo::LatLng;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

impl GeoClient {
    /// Human-readable address for a point, or its coordinates when none can be found.
    pub async fn reverse_geocode(&self, point: LatLng) -> String {
        match self.lookup_address(point).await {
            Some(address) => address,
            None => point.fallback_label(),
        }
    }

    async fn lookup_address(&self, point: LatLng) -> Option<String> {
        let url = format!("{}/reverse", self.nominatim_url);
        let query = [
            ("format", "json".to_string()),
            ("lat", point.lat.to_string()),
            ("lon", point.lng.to_string()),
            ("zoom", "18".to_string()),
            ("addressdetails", "1".to_string()),
        ];

        let response = match self.http.get(&url).query(&query).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, lat = point.lat, lng = point.lng, "Reverse geocoding failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Reverse geocoding rejected");
            return None;
        }

        match response.bytes().await {
            Ok(body) => parse_display_name(&body),
            Err(e) => {
                tracing::warn!(error = %e, "Reverse geocoding body unreadable");
                None
            }
        }
    }
}

fn parse_display_name(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ReverseResponse>(body)
        .ok()?
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}
