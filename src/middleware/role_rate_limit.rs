use axum::http::Request;
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder,
    key_extractor::KeyExtractor,
    GovernorError, GovernorLayer,
};

use crate::middleware::rate_limit::rate_limit_error_handler;
use crate::session::SessionContext;

/// Keys the limiter on the signed-in user's id.
#[derive(Debug, Clone, Copy)]
pub struct SessionUserExtractor;

impl KeyExtractor for SessionUserExtractor {
    type Key = String;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let session = req
            .extensions()
            .get::<SessionContext>()
            .ok_or(GovernorError::UnableToExtractKey)?;

        session
            .try_user_id()
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

pub type RoleGovernorLayer = GovernorLayer<
    SessionUserExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    axum::body::Body,
>;

/// Roles whose ride-mutating routes are throttled. Admins are not.
pub enum RateLimitedRole {
    Rider,
    Driver,
}

/// Create a GovernorLayer for a specific role
/// - Driver: 60 ride actions per minute, burst 20
/// - Rider: 12 bookings or cancellations per minute, burst 5
pub fn create_role_governor(role: RateLimitedRole) -> RoleGovernorLayer {
    let (per_ms, burst) = match role {
        RateLimitedRole::Driver => (1_000, 20),
        RateLimitedRole::Rider => (5_000, 5),
    };

    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(burst)
            .key_extractor(SessionUserExtractor)
            .finish()
            .expect("role governor config is valid"),
    );

    GovernorLayer::new(config).error_handler(rate_limit_error_handler)
}
