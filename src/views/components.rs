use chrono::{DateTime, Utc};

use crate::entities::ride::{Ride, RideStatus};
use crate::entities::user::UserRef;
use crate::utils::html::{escape, with_query};
use crate::utils::pagination::Pagination;

/// Previous/next control. `extra` query pairs (a search term, say) are kept on both links.
pub fn pagination(base: &str, pagination: &Pagination, extra: &[(&str, &str)]) -> String {
    let link = |target: Option<u32>, label: &str| match target {
        Some(page) => {
            let page = page.to_string();
            let mut pairs = vec![("page", page.as_str())];
            pairs.extend_from_slice(extra);
            format!(
                "<a class=\"button\" href=\"{}\">{label}</a>",
                escape(&with_query(base, &pairs))
            )
        }
        None => format!("<button type=\"button\" disabled>{label}</button>"),
    };

    format!(
        "<div class=\"pager\">{prev}<span>{label}</span>{next}</div>",
        prev = link(pagination.previous(), "Previous"),
        label = pagination.label(),
        next = link(pagination.next(), "Next"),
    )
}

pub fn status_badge(status: RideStatus) -> String {
    format!(
        "<span class=\"{}\">{}</span>",
        status.badge_class(),
        status.as_str()
    )
}

pub fn money(amount: Option<f64>) -> String {
    format!("${:.2}", amount.unwrap_or(0.0))
}

pub fn km(distance: Option<f64>) -> String {
    match distance {
        Some(d) => format!("{:.2} km", d),
        None => "-".to_string(),
    }
}

pub fn date(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn user_name(user: Option<&UserRef>) -> String {
    match user {
        Some(user) => escape(user.name().unwrap_or(user.id())),
        None => "Unassigned".to_string(),
    }
}

/// Hidden-field POST button used for every state-changing action.
pub fn post_button(action: &str, label: &str, class: &str) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"{}\"><button type=\"submit\" class=\"{class}\">{}</button></form>",
        escape(action),
        escape(label)
    )
}

pub fn empty_row(colspan: u8, message: &str) -> String {
    format!("<tr><td colspan=\"{colspan}\">{}</td></tr>", escape(message))
}

/// Route endpoints, shown as coordinates.
pub fn route_cell(ride: &Ride) -> String {
    format!(
        "{} &rarr; {}",
        ride.start_ride.fallback_label(),
        ride.end_ride.fallback_label()
    )
}
