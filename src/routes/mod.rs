use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, auth, booking, driver, geo, payment, public, rider};
use crate::middleware::auth::{route_guard, session_middleware};
use crate::middleware::rate_limit::{create_public_governor, log_request};
use crate::middleware::role_rate_limit::{create_role_governor, RateLimitedRole};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let rate_limited = state.config.rate_limit_enabled;

    // Sign-in forms
    let mut auth_routes = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page))
        .route(
            "/register-rider",
            get(auth::register_rider_page).post(auth::register_rider),
        )
        .route(
            "/register-driver",
            get(auth::register_driver_page).post(auth::register_driver),
        )
        .route(
            "/forgot-password",
            get(auth::forgot_password_page).post(auth::send_otp),
        )
        .route("/reset-password", post(auth::reset_password));

    // Map proxy used by the booking page script
    let mut geo_routes = Router::new()
        .route("/reverse", get(geo::reverse))
        .route("/route", get(geo::route));

    let mut booking_routes = Router::new().route("/bookRide", post(booking::submit));

    let admin_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/Admin/state") }))
        .route("/state", get(admin::stats))
        .route("/manage-user", get(admin::users))
        .route("/manage-user/{id}/verify", post(admin::change_verification))
        .route("/manage-user/{id}/delete", post(admin::delete_user))
        .route("/manage-ride", get(admin::rides))
        .route("/manage-ride/{id}", get(admin::ride_detail))
        .route("/manage-ride/{id}/discount", post(admin::send_discount))
        .route("/manage-rating", get(admin::ratings))
        .route("/payments", get(admin::payments));

    let mut rider_actions = Router::new()
        .route("/manage-rider/{id}/cancel", post(rider::cancel_ride))
        .route("/manage-rider/{id}/rate", post(rider::rate_ride));

    let rider_pages = Router::new()
        .route("/", get(|| async { Redirect::to("/Rider/profile") }))
        .route("/profile", get(rider::profile).post(rider::update_profile))
        .route("/manage-rider", get(rider::rides))
        .route("/manage-rider/{id}", get(rider::ride_detail));

    let mut driver_actions =
        Router::new().route("/manage-ride/{id}/{action}", post(driver::ride_action));

    let driver_pages = Router::new()
        .route("/", get(|| async { Redirect::to("/Driver/profile") }))
        .route("/profile", get(driver::profile))
        .route("/vehicle", post(driver::create_vehicle))
        .route("/vehicle/{id}/delete", post(driver::delete_vehicle))
        .route("/manage-ride", get(driver::active_rides))
        .route("/complete-ride", get(driver::completed_rides));

    // Rate limiting keys on the peer address or the session, so it can be
    // switched off where neither is available.
    if rate_limited {
        let public_governor = create_public_governor();
        auth_routes = auth_routes.layer(public_governor.clone());
        geo_routes = geo_routes.layer(public_governor);

        let rider_governor = create_role_governor(RateLimitedRole::Rider);
        booking_routes = booking_routes.layer(rider_governor.clone());
        rider_actions = rider_actions.layer(rider_governor);
        driver_actions = driver_actions.layer(create_role_governor(RateLimitedRole::Driver));
    }

    Router::new()
        .route("/", get(public::home))
        .route("/about", get(public::about))
        .route("/contact", get(public::contact))
        .route("/health", get(public::health))
        .route("/bookRide", get(booking::show))
        .route("/logout", post(auth::logout))
        .route("/auth/google", get(auth::google_login))
        .route("/payment/{outcome}", get(payment::callback))
        .merge(booking_routes)
        .merge(auth_routes)
        .nest("/api/geo", geo_routes)
        .nest("/Admin", admin_routes)
        .nest("/Rider", rider_pages.merge(rider_actions))
        .nest("/Driver", driver_pages.merge(driver_actions))
        .fallback(public::not_found)
        // Outermost last: the session is resolved before the guard reads it.
        .layer(middleware::from_fn(route_guard))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
