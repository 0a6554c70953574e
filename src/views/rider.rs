use crate::entities::ride::{Ride, RideStatus};
use crate::entities::user::User;
use crate::utils::html::escape;
use crate::views::admin::ride_history;
use crate::views::components::{date, empty_row, km, money, post_button, route_cell, status_badge, user_name};
use crate::views::layout::{dashboard, Chrome};

pub fn profile_page(chrome: &Chrome, user: &User, ride_count: u64) -> String {
    let body = format!(
        "<h1>My Profile</h1><div class=\"cards\">\
<div class=\"card\"><h3>{initial}</h3><p>{name}</p><small>{email}</small></div>\
<div class=\"card\"><h3>Total Rides</h3><p>{ride_count}</p></div>\
<div class=\"card\"><h3>Status</h3><p>{verified}</p><small>Member since {joined}</small></div></div>\
<h2>Edit Profile</h2><form method=\"post\" action=\"/Rider/profile\">\
<label>Name <input name=\"name\" required value=\"{name}\"></label>\
<label>Phone <input name=\"phone\" value=\"{phone}\"></label>\
<button type=\"submit\">Save Changes</button></form>",
        initial = user.initial(),
        name = escape(&user.name),
        email = escape(&user.email),
        verified = if user.is_verified { "Verified" } else { "Unverified" },
        joined = date(user.created_at),
        phone = escape(user.phone.as_deref().unwrap_or("")),
    );
    dashboard("My Profile", chrome, "/Rider/profile", &body)
}

pub fn rides_page(chrome: &Chrome, rides: &[Ride]) -> String {
    let rows: String = rides
        .iter()
        .map(|ride| {
            let cancel = if ride.ride_status.is_cancellable() {
                post_button(&format!("/Rider/manage-rider/{}/cancel", ride.id), "Cancel", "danger")
            } else {
                String::new()
            };
            format!(
                "<tr><td>{route}</td><td>{fare}</td><td>{distance}</td><td>{status}</td>\
<td>{created}</td><td><a href=\"/Rider/manage-rider/{id}\">View</a> {cancel}</td></tr>",
                route = route_cell(ride),
                fare = money(ride.fare),
                distance = km(ride.distance),
                status = status_badge(ride.ride_status),
                created = date(ride.created_at),
                id = escape(&ride.id),
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        empty_row(6, "You have not booked any rides yet")
    } else {
        rows
    };

    let body = format!(
        "<h1>My Rides</h1><p><a class=\"button\" href=\"/bookRide\">Book a new ride</a></p>\
<table><thead><tr><th>Route</th><th>Fare</th><th>Distance</th><th>Status</th><th>Created</th>\
<th>Actions</th></tr></thead><tbody>{rows}</tbody></table>"
    );
    dashboard("My Rides", chrome, "/Rider/manage-rider", &body)
}

fn rating_form(ride: &Ride) -> String {
    let Some(driver) = ride.driver.as_ref() else {
        return String::new();
    };
    if ride.ride_status != RideStatus::Completed {
        return String::new();
    }

    let options: String = (1..=5u8)
        .rev()
        .map(|score| format!("<option value=\"{score}\">{score}</option>"))
        .collect();

    format!(
        "<h2>Rate your driver</h2><form method=\"post\" action=\"/Rider/manage-rider/{id}/rate\">\
<input type=\"hidden\" name=\"to\" value=\"{to}\">\
<label>Score <select name=\"score\" required>{options}</select></label>\
<label>Comment <textarea name=\"comment\"></textarea></label>\
<button type=\"submit\">Submit Rating</button></form>",
        id = escape(&ride.id),
        to = escape(driver.id()),
    )
}

pub fn ride_detail_page(chrome: &Chrome, ride: &Ride) -> String {
    let cancel = if ride.ride_status.is_cancellable() {
        post_button(&format!("/Rider/manage-rider/{}/cancel", ride.id), "Cancel Ride", "danger")
    } else {
        String::new()
    };

    let body = format!(
        "<p><a href=\"/Rider/manage-rider\">&larr; Back to my rides</a></p><h1>Ride Details</h1>\
<div class=\"cards\"><div class=\"card\"><h3>Route</h3><p>{route}</p></div>\
<div class=\"card\"><h3>Driver</h3><p>{driver}</p></div>\
<div class=\"card\"><h3>Fare</h3><p>{fare}</p><small>{distance}</small></div>\
<div class=\"card\"><h3>Status</h3><p>{status}</p></div></div>\
<h2>History</h2>{history}{cancel}{rating}",
        route = route_cell(ride),
        driver = user_name(ride.driver.as_ref()),
        fare = money(ride.fare),
        distance = km(ride.distance),
        status = status_badge(ride.ride_status),
        history = ride_history(ride),
        rating = rating_form(ride),
    );
    dashboard("Ride Details", chrome, "/Rider/manage-rider", &body)
}
