pub mod backend;
pub mod config;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod maps;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod utils;
pub mod views;

use std::sync::Arc;

pub use backend::BackendClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use maps::GeoClient;

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub geo: GeoClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let backend = BackendClient::new(&config)?;
        let geo = GeoClient::new(&config)?;

        Ok(Self {
            backend,
            geo,
            config: Arc::new(config),
        })
    }
}
