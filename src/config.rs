use std::env;
use std::time::Duration;

use crate::utils::geo::LatLng;
use crate::utils::jwt::TokenTrust;

#[derive(Clone)]
pub struct Config {
    pub backend_url: String,
    pub nominatim_url: String,
    pub osrm_url: String,
    pub jwt_secret: Option<String>,
    pub http_timeout_secs: u64,
    pub cookie_secure: bool,
    pub rate_limit_enabled: bool,
    pub map_center: LatLng,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            backend_url: env::var("BACKEND_URL")
                .or_else(|_| env::var("NEXT_PUBLIC_BACKEND"))
                .map(|url| url.trim_end_matches('/').to_string())
                .expect("BACKEND_URL (or NEXT_PUBLIC_BACKEND) must be set"),
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            osrm_url: env::var("OSRM_URL")
                .unwrap_or_else(|_| "https://router.project-osrm.org".to_string()),
            jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("HTTP_TIMEOUT_SECS must be a number"),
            cookie_secure: env_flag("COOKIE_SECURE", false),
            rate_limit_enabled: env_flag("RATE_LIMIT_ENABLED", true),
            map_center: LatLng {
                lat: env::var("MAP_CENTER_LAT")
                    .unwrap_or_else(|_| "23.8103".to_string())
                    .parse()
                    .expect("MAP_CENTER_LAT must be a number"),
                lng: env::var("MAP_CENTER_LNG")
                    .unwrap_or_else(|_| "90.4125".to_string())
                    .parse()
                    .expect("MAP_CENTER_LNG must be a number"),
            },
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
        }
    }

    /// Configuration pointing every upstream at `backend_url`, with rate limiting off.
    /// Used by tests and local tooling that run without a socket peer address.
    pub fn for_backend(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            nominatim_url: backend_url.trim_end_matches('/').to_string(),
            osrm_url: backend_url.trim_end_matches('/').to_string(),
            jwt_secret: None,
            http_timeout_secs: 5,
            cookie_secure: false,
            rate_limit_enabled: false,
            map_center: LatLng {
                lat: 23.8103,
                lng: 90.4125,
            },
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn token_trust(&self) -> TokenTrust {
        match &self.jwt_secret {
            Some(secret) => TokenTrust::Verified(secret.clone()),
            None => TokenTrust::Unverified,
        }
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
