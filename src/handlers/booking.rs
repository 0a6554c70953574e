use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::entities::ride::CreateRideRequest;
use crate::error::AppResult;
use crate::handlers::{outcome_flash, redirect_with, FlashRedirect, PageContext, PageResponse};
use crate::session::SessionContext;
use crate::utils::flash::{Flash, FlashKind};
use crate::utils::geo::LatLng;
use crate::utils::serde_ext::lenient_f64;
use crate::utils::html::with_query;
use crate::views::booking::{booking_page, BookingPoint, BookingView, MapMode};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BookingQuery {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start_lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub end_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub end_lng: Option<f64>,
    pub promo_code: Option<String>,
    pub mode: Option<String>,
}

impl BookingQuery {
    pub fn start(&self) -> Option<LatLng> {
        LatLng::from_parts(self.start_lat, self.start_lng)
    }

    pub fn end(&self) -> Option<LatLng> {
        LatLng::from_parts(self.end_lat, self.end_lng)
    }

    /// Trimmed promo code, `None` when blank.
    pub fn promo(&self) -> Option<String> {
        self.promo_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
    }

    /// Page URL that re-displays the same points and promo code.
    fn back_link(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(p) = self.start() {
            pairs.push(("start_lat", p.lat.to_string()));
            pairs.push(("start_lng", p.lng.to_string()));
        }
        if let Some(p) = self.end() {
            pairs.push(("end_lat", p.lat.to_string()));
            pairs.push(("end_lng", p.lng.to_string()));
        }
        if let Some(code) = self.promo() {
            pairs.push(("promo_code", code));
        }
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        with_query("/bookRide", &refs)
    }
}

pub async fn show(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Query(query): Query<BookingQuery>,
) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;

    let resolve = |point: Option<LatLng>| {
        let geo = state.geo.clone();
        async move {
            match point {
                Some(point) => Some(BookingPoint {
                    point,
                    address: geo.reverse_geocode(point).await,
                }),
                None => None,
            }
        }
    };

    let (start, end) = tokio::join!(resolve(query.start()), resolve(query.end()));

    let distance_km = match (&start, &end) {
        (Some(a), Some(b)) => state.geo.driving_distance_km(a.point, b.point).await,
        _ => None,
    };

    let promo = query.promo().unwrap_or_default();
    let view = BookingView {
        mode: MapMode::parse(query.mode.as_deref()),
        start,
        end,
        distance_km,
        promo_code: &promo,
        map_center: state.config.map_center,
    };

    (jar, Html(booking_page(&ctx.chrome(), &view)))
}

pub async fn submit(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Form(form): Form<BookingQuery>,
) -> AppResult<FlashRedirect> {
    let Ok((user, token)) = session.require().await else {
        return Ok(redirect_with(
            jar,
            Flash::error("Please sign in to book a ride"),
            "/login?redirect=%2FbookRide",
        ));
    };

    let (Some(start_ride), Some(end_ride)) = (form.start(), form.end()) else {
        return Ok(redirect_with(
            jar,
            Flash::error("Please set both pickup and destination locations"),
            &form.back_link(),
        ));
    };

    let request = CreateRideRequest {
        start_ride,
        end_ride,
        rider: user.id.clone(),
        promo_code: form.promo(),
    };

    tracing::debug!(rider = %user.id, promo = request.promo_code.is_some(), "Booking ride");
    let flash = outcome_flash(
        state.backend.create_ride(&token, &request).await,
        "Ride created",
        "Ride creation failed",
    )?;

    // Success starts a fresh form; failure keeps the picked points.
    let target = match flash.kind {
        FlashKind::Success => "/bookRide".to_string(),
        FlashKind::Error => form.back_link(),
    };
    Ok(redirect_with(jar, flash, &target))
}
