use crate::entities::payment::Payment;
use crate::entities::rating::{Rating, RatingFilter, RatingStats, ScoreBand};
use crate::entities::ride::{Ride, RideStatus};
use crate::entities::stats::AdminStats;
use crate::entities::user::User;
use crate::utils::html::escape;
use crate::utils::pagination::Pagination;
use crate::views::components::{
    date, empty_row, km, money, pagination, post_button, route_cell, status_badge, user_name,
};
use crate::views::layout::{dashboard, Chrome};

pub fn stats_page(chrome: &Chrome, stats: &AdminStats) -> String {
    let bars: String = stats
        .day_bars()
        .into_iter()
        .map(|(day, rides, pct)| {
            format!(
                "<tr><td>{}</td><td style=\"width:60%\"><div class=\"bar\" style=\"width:{pct}%\"></div></td><td>{rides}</td></tr>",
                escape(day)
            )
        })
        .collect();
    let bars = if bars.is_empty() {
        empty_row(3, "No ride data yet")
    } else {
        bars
    };

    let ratio = stats
        .users_per_driver()
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "-".to_string());

    let body = format!(
        "<h1>Dashboard Overview</h1><div class=\"cards\">\
<div class=\"card\"><h3>Total Rides</h3><p>{rides}</p></div>\
<div class=\"card\"><h3>Total Income</h3><p>{income}</p></div>\
<div class=\"card\"><h3>Total Users</h3><p>{users}</p></div>\
<div class=\"card\"><h3>Total Drivers</h3><p>{drivers}</p></div></div>\
<h2>Rides Overview <small>Last {days} days</small></h2><table>{bars}</table>\
<h2>Platform Summary</h2><ul><li>Average daily rides: {avg:.1}</li>\
<li>Users per driver: {ratio}</li></ul>",
        rides = stats.total_rides,
        income = money(Some(stats.total_income)),
        users = stats.total_users,
        drivers = stats.total_drivers,
        days = stats.rides_by_day.len(),
        avg = stats.average_daily_rides(),
    );
    dashboard("Dashboard", chrome, "/Admin/state", &body)
}

pub fn users_page(chrome: &Chrome, users: &[User], pager: &Pagination, search: &str) -> String {
    let rows: String = users
        .iter()
        .map(|user| {
            let (toggle_label, next) = if user.is_verified {
                ("Unverify", "false")
            } else {
                ("Verify", "true")
            };
            let id = escape(&user.id);
            format!(
                "<tr><td>{initial}</td><td>{name}</td><td>{email}</td><td>{phone}</td><td>{role}</td>\
<td>{verified}</td><td>{created}</td><td>\
<form class=\"inline\" method=\"post\" action=\"/Admin/manage-user/{id}/verify\">\
<input type=\"hidden\" name=\"is_verify\" value=\"{next}\"><button type=\"submit\">{toggle_label}</button></form> {delete}</td></tr>",
                initial = user.initial(),
                name = escape(&user.name),
                email = escape(&user.email),
                phone = escape(user.phone.as_deref().unwrap_or("-")),
                role = user.role,
                verified = if user.is_verified { "Verified" } else { "Unverified" },
                created = date(user.created_at),
                delete = post_button(&format!("/Admin/manage-user/{}/delete", user.id), "Delete", "danger"),
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        empty_row(8, "No users found")
    } else {
        rows
    };

    let extra: Vec<(&str, &str)> = if search.is_empty() {
        Vec::new()
    } else {
        vec![("searchTerm", search)]
    };

    let body = format!(
        "<h1>Manage Users</h1>\
<form method=\"get\" action=\"/Admin/manage-user\">\
<input name=\"searchTerm\" placeholder=\"Search by email...\" value=\"{search}\">\
<button type=\"submit\">Search</button></form>\
<table><thead><tr><th></th><th>Name</th><th>Email</th><th>Phone</th><th>Role</th>\
<th>Status</th><th>Joined</th><th>Actions</th></tr></thead><tbody>{rows}</tbody></table>{pager}",
        search = escape(search),
        pager = pagination("/Admin/manage-user", pager, &extra),
    );
    dashboard("Manage Users", chrome, "/Admin/manage-user", &body)
}

pub fn rides_page(chrome: &Chrome, rides: &[Ride], pager: &Pagination) -> String {
    let rows: String = rides
        .iter()
        .map(|ride| {
            format!(
                "<tr><td>{rider}<br><small>{email}</small></td><td>{fare}</td><td>{distance}</td>\
<td>{duration}</td><td>{status}</td><td>{created}</td>\
<td><a href=\"/Admin/manage-ride/{id}\">View</a></td></tr>",
                rider = user_name(ride.rider.as_ref()),
                email = escape(ride.rider.as_ref().and_then(|r| r.email()).unwrap_or("")),
                fare = money(ride.fare),
                distance = km(ride.distance),
                duration = ride
                    .duration
                    .map(|d| format!("{:.1} min", d))
                    .unwrap_or_else(|| "-".to_string()),
                status = status_badge(ride.ride_status),
                created = date(ride.created_at),
                id = escape(&ride.id),
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        empty_row(7, "No rides found")
    } else {
        rows
    };

    let body = format!(
        "<h1>Manage Rides</h1><table><thead><tr><th>Rider</th><th>Fare</th><th>Distance</th>\
<th>Duration</th><th>Status</th><th>Date</th><th>Action</th></tr></thead><tbody>{rows}</tbody></table>{pager}",
        pager = pagination("/Admin/manage-ride", pager, &[]),
    );
    dashboard("Manage Rides", chrome, "/Admin/manage-ride", &body)
}

pub fn ride_history(ride: &Ride) -> String {
    let items: String = ride
        .ride_history
        .iter()
        .map(|entry| {
            format!(
                "<li>{} at {}</li>",
                status_badge(entry.status),
                entry.time.format("%b %d, %Y %H:%M")
            )
        })
        .collect();
    if items.is_empty() {
        "<p>No history recorded.</p>".to_string()
    } else {
        format!("<ol>{items}</ol>")
    }
}

pub fn ride_detail_page(chrome: &Chrome, ride: &Ride) -> String {
    // A discount code is only useful before the fare is settled.
    let discount = match ride.rider.as_ref().and_then(|r| r.email()) {
        Some(email) if ride.ride_status == RideStatus::Requested => format!(
            "<form method=\"post\" action=\"/Admin/manage-ride/{id}/discount\">\
<input type=\"hidden\" name=\"email\" value=\"{email}\">\
<button type=\"submit\">Send Discount OTP</button></form>",
            id = escape(&ride.id),
            email = escape(email),
        ),
        _ => String::new(),
    };

    let body = format!(
        "<p><a href=\"/Admin/manage-ride\">&larr; Back to rides</a></p><h1>Ride Details</h1>\
<div class=\"cards\"><div class=\"card\"><h3>Rider</h3><p>{rider}</p><small>{email}</small></div>\
<div class=\"card\"><h3>Driver</h3><p>{driver}</p></div>\
<div class=\"card\"><h3>Route</h3><p>{route}</p></div>\
<div class=\"card\"><h3>Fare</h3><p>{fare}</p><small>{distance}</small></div>\
<div class=\"card\"><h3>Status</h3><p>{status}</p><small>Promo: {promo}</small></div></div>\
<h2>History</h2>{history}{discount}",
        rider = user_name(ride.rider.as_ref()),
        email = escape(ride.rider.as_ref().and_then(|r| r.email()).unwrap_or("")),
        driver = user_name(ride.driver.as_ref()),
        route = route_cell(ride),
        fare = money(ride.fare),
        distance = km(ride.distance),
        status = status_badge(ride.ride_status),
        promo = escape(ride.promo_code.as_deref().unwrap_or("-")),
        history = ride_history(ride),
    );
    dashboard("Ride Details", chrome, "/Admin/manage-ride", &body)
}

pub fn ratings_page(chrome: &Chrome, ratings: &[Rating], filter: &RatingFilter) -> String {
    let stats = RatingStats::from_ratings(ratings);
    let rows: String = filter
        .apply(ratings)
        .into_iter()
        .map(|rating| {
            format!(
                "<tr><td>{from}</td><td>{to}</td><td class=\"{band}\">{score}/5</td>\
<td>{comment}</td><td>{created}</td></tr>",
                from = escape(&rating.from.name),
                to = escape(&rating.to.name),
                band = ScoreBand::of(rating.score).css_class(),
                score = rating.score,
                comment = escape(&rating.comment),
                created = date(rating.created_at),
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        empty_row(5, "No ratings match your filters")
    } else {
        rows
    };

    let options: String = (1..=5u8)
        .rev()
        .map(|score| {
            let selected = if filter.score == Some(score) { " selected" } else { "" };
            format!("<option value=\"{score}\"{selected}>{score} stars</option>")
        })
        .collect();

    let body = format!(
        "<h1>Manage Ratings</h1><div class=\"cards\">\
<div class=\"card\"><h3>Total Ratings</h3><p>{total}</p></div>\
<div class=\"card\"><h3>Average Score</h3><p>{average}</p></div>\
<div class=\"card\"><h3>Excellent (4+)</h3><p>{excellent}</p></div>\
<div class=\"card\"><h3>Poor (2 or less)</h3><p>{poor}</p></div></div>\
<form method=\"get\" action=\"/Admin/manage-rating\">\
<input name=\"search\" placeholder=\"Search by name or comment...\" value=\"{search}\">\
<select name=\"score\"><option value=\"\">All scores</option>{options}</select>\
<button type=\"submit\">Filter</button></form>\
<table><thead><tr><th>From</th><th>To</th><th>Score</th><th>Comment</th><th>Date</th></tr></thead>\
<tbody>{rows}</tbody></table>",
        total = stats.total,
        average = stats.average_label(),
        excellent = stats.excellent,
        poor = stats.poor,
        search = escape(&filter.search),
    );
    dashboard("Manage Ratings", chrome, "/Admin/manage-rating", &body)
}

pub fn payments_page(chrome: &Chrome, payments: &[Payment]) -> String {
    let rows: String = payments
        .iter()
        .map(|payment| {
            format!(
                "<tr><td>{tx}</td><td>{ride}</td><td>{amount}</td><td>{status}</td><td>{created}</td></tr>",
                tx = escape(payment.transaction_id.as_deref().unwrap_or("-")),
                ride = escape(payment.ride.as_deref().unwrap_or("-")),
                amount = money(payment.amount),
                status = escape(payment.status.as_deref().unwrap_or("-")),
                created = date(payment.created_at),
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        empty_row(5, "No payments yet")
    } else {
        rows
    };

    let body = format!(
        "<h1>Payments</h1><table><thead><tr><th>Transaction</th><th>Ride</th><th>Amount</th>\
<th>Status</th><th>Date</th></tr></thead><tbody>{rows}</tbody></table>"
    );
    dashboard("Payments", chrome, "/Admin/payments", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride(status: &str, rider_email: Option<&str>) -> Ride {
        let rider = match rider_email {
            Some(email) => serde_json::json!({"_id": "u1", "name": "Sami", "email": email}),
            None => serde_json::json!("u1"),
        };
        serde_json::from_value(serde_json::json!({
            "_id": "r1",
            "rider": rider,
            "startRide": {"lat": 23.81, "lang": 90.41},
            "endRide": {"lat": 23.87, "lang": 90.40},
            "rideStatus": status,
        }))
        .unwrap()
    }

    #[test]
    fn discount_offered_only_for_requested_rides_with_email() {
        let chrome = Chrome::default();
        assert!(ride_detail_page(&chrome, &ride("requested", Some("s@x.io"))).contains("Send Discount OTP"));
        assert!(!ride_detail_page(&chrome, &ride("accepted", Some("s@x.io"))).contains("Send Discount OTP"));
        assert!(!ride_detail_page(&chrome, &ride("requested", None)).contains("Send Discount OTP"));
    }

    #[test]
    fn user_search_is_kept_in_pagination() {
        let html = users_page(&Chrome::default(), &[], &Pagination::new(1, Some(2)), "gmail");
        assert!(html.contains("searchTerm=gmail"));
        assert!(html.contains("No users found"));
    }
}
