//! Third-party map services: Nominatim reverse geocoding and OSRM routing.
//!
//! Neither service is allowed to fail a request. Lookups that go wrong are
//! logged and degrade to raw coordinates or an unknown distance.

pub mod nominatim;
pub mod osrm;

use reqwest::Client;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub use osrm::RouteSummary;

const USER_AGENT: &str = concat!("tracksy-web/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct GeoClient {
    http: Client,
    nominatim_url: String,
    osrm_url: String,
}

impl GeoClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        // Nominatim's usage policy requires an identifying User-Agent.
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create geo client: {}", e)))?;

        Ok(Self {
            http,
            nominatim_url: config.nominatim_url.trim_end_matches('/').to_string(),
            osrm_url: config.osrm_url.trim_end_matches('/').to_string(),
        })
    }
}
