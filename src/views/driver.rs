use crate::entities::ride::{Ride, RideStatus};
use crate::entities::user::{DriverProfile, User};
use crate::entities::vehicle::Vehicle;
use crate::utils::html::escape;
use crate::utils::pagination::Pagination;
use crate::views::auth::vehicle_kind_options;
use crate::views::components::{
    date, empty_row, km, money, pagination, post_button, route_cell, status_badge, user_name,
};
use crate::views::layout::{dashboard, Chrome};

/// The single transition control for a ride, or nothing once it is finished.
pub fn action_button(ride: &Ride) -> String {
    match ride.ride_status.next_driver_action() {
        Some(action) => post_button(
            &format!("/Driver/manage-ride/{}/{}", ride.id, action.slug()),
            action.label(),
            action.slug(),
        ),
        None => String::new(),
    }
}

pub fn manage_rides_page(chrome: &Chrome, rides: &[Ride]) -> String {
    let count = |status: RideStatus| rides.iter().filter(|r| r.ride_status == status).count();

    let rows: String = rides
        .iter()
        .map(|ride| {
            format!(
                "<tr><td>{rider}<br><small>{email}</small></td><td>{route}</td><td>{fare}</td>\
<td>{created}</td><td>{status}</td><td>{action}</td></tr>",
                rider = user_name(ride.rider.as_ref()),
                email = escape(ride.rider.as_ref().and_then(|r| r.email()).unwrap_or("No email")),
                route = route_cell(ride),
                fare = money(ride.fare),
                created = date(ride.created_at),
                status = status_badge(ride.ride_status),
                action = action_button(ride),
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        empty_row(6, "No active rides right now")
    } else {
        rows
    };

    let body = format!(
        "<h1>Manage Rides</h1><div class=\"cards\">\
<div class=\"card\"><h3>Pending Requests</h3><p>{requested}</p></div>\
<div class=\"card\"><h3>Accepted</h3><p>{accepted}</p></div>\
<div class=\"card\"><h3>In Progress</h3><p>{started}</p></div></div>\
<table><thead><tr><th>Rider</th><th>Route</th><th>Fare</th><th>Requested</th><th>Status</th>\
<th>Action</th></tr></thead><tbody>{rows}</tbody></table>",
        requested = count(RideStatus::Requested),
        accepted = count(RideStatus::Accepted),
        started = count(RideStatus::Started),
    );
    dashboard("Manage Rides", chrome, "/Driver/manage-ride", &body)
}

/// Sum of fares shown on the current page.
pub fn page_income(rides: &[Ride]) -> f64 {
    rides.iter().filter_map(|r| r.fare).sum()
}

pub fn completed_rides_page(chrome: &Chrome, rides: &[Ride], pager: &Pagination) -> String {
    let rows: String = rides
        .iter()
        .map(|ride| {
            format!(
                "<tr><td>{rider}</td><td>{route}</td><td>{distance}</td><td>{fare}</td>\
<td>{promo}</td><td>{finished}</td></tr>",
                rider = user_name(ride.rider.as_ref()),
                route = route_cell(ride),
                distance = km(ride.distance),
                fare = money(ride.fare),
                promo = escape(ride.promo_code.as_deref().unwrap_or("-")),
                finished = date(ride.updated_at.or(ride.created_at)),
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        empty_row(6, "No completed rides yet")
    } else {
        rows
    };

    let body = format!(
        "<h1>Completed Rides</h1><div class=\"cards\">\
<div class=\"card\"><h3>Rides on this page</h3><p>{count}</p></div>\
<div class=\"card\"><h3>Income on this page</h3><p>{income}</p></div></div>\
<table><thead><tr><th>Rider</th><th>Route</th><th>Distance</th><th>Fare</th><th>Promo</th>\
<th>Completed</th></tr></thead><tbody>{rows}</tbody></table>{pager}",
        count = rides.len(),
        income = money(Some(page_income(rides))),
        pager = pagination("/Driver/complete-ride", pager, &[]),
    );
    dashboard("Completed Rides", chrome, "/Driver/complete-ride", &body)
}

fn vehicle_section(vehicle: Option<&Vehicle>) -> String {
    match vehicle {
        Some(v) => {
            let image = v
                .vehicle_image
                .as_deref()
                .map(|src| format!("<img src=\"{}\" alt=\"{}\" width=\"240\">", escape(src), escape(&v.model)))
                .unwrap_or_default();
            format!(
                "<div class=\"card\">{image}<h3>{model}</h3><p>{kind}</p>\
<p>Year: {year}</p><p>Capacity: {capacity} people</p>{delete}</div>",
                model = escape(&v.model),
                kind = escape(v.kind.as_deref().unwrap_or("-")),
                year = v.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
                capacity = v.max_capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
                delete = post_button(&format!("/Driver/vehicle/{}/delete", v.id), "Delete Vehicle", "danger"),
            )
        }
        None => format!(
            "<p>No vehicle registered yet.</p>\
<form method=\"post\" action=\"/Driver/vehicle\" enctype=\"multipart/form-data\">\
<label>Model <input name=\"model\" required></label>\
<label>Year <input type=\"number\" name=\"year\" required></label>\
<label>Max Capacity <input type=\"number\" name=\"maxCapacity\" required></label>\
<label>Type <select name=\"type\">{kinds}</select></label>\
<label>Vehicle Image <input type=\"file\" name=\"vehicleImage\" accept=\"image/*\" required></label>\
<button type=\"submit\">Add Vehicle</button></form>",
            kinds = vehicle_kind_options(),
        ),
    }
}

pub fn profile_page(chrome: &Chrome, user: &User) -> String {
    let empty = DriverProfile::default();
    let profile = user.driver_profile.as_ref().unwrap_or(&empty);
    let location = profile
        .location
        .map(|p| p.fallback_label())
        .unwrap_or_else(|| "-".to_string());

    let body = format!(
        "<h1>Driver Profile</h1><div class=\"cards\">\
<div class=\"card\"><h3>{initial}</h3><p>{name}</p><small>{email}</small></div>\
<div class=\"card\"><h3>Rating</h3><p>{rating:.1}</p></div>\
<div class=\"card\"><h3>Accepted Rides</h3><p>{accepted}</p></div>\
<div class=\"card\"><h3>Total Income</h3><p>{income}</p></div>\
<div class=\"card\"><h3>Status</h3><p>{status}</p><small>License: {license}</small></div>\
<div class=\"card\"><h3>Location</h3><p>{location}</p></div></div>\
<h2>My Vehicle</h2>{vehicle}",
        initial = user.initial(),
        name = escape(&user.name),
        email = escape(&user.email),
        rating = profile.rating.unwrap_or(0.0),
        accepted = profile.accepted_ride.unwrap_or(0),
        income = money(profile.income),
        status = escape(profile.status.as_deref().unwrap_or("unknown")),
        license = escape(profile.license_number.as_deref().unwrap_or("-")),
        vehicle = vehicle_section(profile.vehicle.as_ref()),
    );
    dashboard("Driver Profile", chrome, "/Driver/profile", &body)
}
