use crate::entities::user::UserRole;
use crate::session::SessionUser;
use crate::utils::flash::{Flash, FlashKind};
use crate::utils::html::escape;

pub const STYLES: &str = "body{font-family:system-ui,sans-serif;margin:0;color:#1f2937}\
a{color:#2563eb;text-decoration:none}header.site{display:flex;justify-content:space-between;\
align-items:center;padding:1rem 2rem;border-bottom:1px solid #e5e7eb}nav a{margin-right:1.25rem}\
main{padding:2rem}.error{text-align:center}.flash{padding:.75rem 2rem}.flash-success{background:#dcfce7}\
.flash-error{background:#fee2e2}.dash{display:flex;min-height:100vh}aside{width:14rem;background:#111827;\
padding:1.5rem}aside a{display:block;color:#e5e7eb;padding:.5rem 0}aside a.active{color:#facc15}\
.crumbs{padding:1rem 2rem;border-bottom:1px solid #e5e7eb;color:#6b7280}table{border-collapse:collapse;width:100%}\
td,th{border-bottom:1px solid #e5e7eb;padding:.5rem;text-align:left}.badge{padding:.1rem .5rem;border-radius:9999px}\
.badge-green{background:#dcfce7}.badge-yellow{background:#fef9c3}.badge-red{background:#fee2e2}\
.badge-blue{background:#dbeafe}.score-good{color:#15803d}.score-fair{color:#a16207}.score-poor{color:#b91c1c}\
.cards{display:flex;gap:1rem;flex-wrap:wrap}.card{border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem;\
min-width:10rem}.bar{background:#2563eb;height:.75rem}.pager{display:flex;gap:1rem;align-items:center;margin-top:1rem}\
#map{height:24rem;margin-bottom:1rem}form.inline{display:inline}";

/// What every page needs to know about the current visitor.
#[derive(Default)]
pub struct Chrome<'a> {
    pub user: Option<&'a SessionUser>,
    pub flash: Option<&'a Flash>,
}

impl<'a> Chrome<'a> {
    pub fn new(user: Option<&'a SessionUser>, flash: Option<&'a Flash>) -> Self {
        Self { user, flash }
    }
}

fn document(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title} | TrackSy</title><style>{STYLES}</style>{head_extra}</head><body>{body}</body></html>",
        title = escape(title),
    )
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => {
            let class = match flash.kind {
                FlashKind::Success => "flash flash-success",
                FlashKind::Error => "flash flash-error",
            };
            format!(
                "<div class=\"{class}\" role=\"status\">{}</div>",
                escape(&flash.message)
            )
        }
        None => String::new(),
    }
}

/// Site header: marketing links, then sign-in or dashboard/logout depending on the session.
pub fn header_nav(user: Option<&SessionUser>) -> String {
    let account = match user {
        Some(user) => format!(
            "<a href=\"{home}\">Dashboard</a>\
<form class=\"inline\" method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>",
            home = user.role.dashboard_home(),
        ),
        None => "<a href=\"/login\">Sign In</a><a href=\"/register\">Get Started</a>".to_string(),
    };

    format!(
        "<header class=\"site\"><a href=\"/\"><strong>TrackSy</strong></a>\
<nav><a href=\"/\">Home</a><a href=\"/about\">About</a><a href=\"/contact\">Contact</a>\
<a href=\"/bookRide\">Book a Ride</a></nav><div>{account}</div></header>"
    )
}

/// Public page shell with the site header.
pub fn page(title: &str, chrome: &Chrome, body: &str) -> String {
    page_with_head(title, chrome, "", body)
}

pub fn page_with_head(title: &str, chrome: &Chrome, head_extra: &str, body: &str) -> String {
    let content = format!(
        "{header}{flash}<main>{body}</main>\
<footer class=\"crumbs\">&copy; TrackSy. Safe rides, fair fares.</footer>",
        header = header_nav(chrome.user),
        flash = flash_banner(chrome.flash),
    );
    document(title, head_extra, &content)
}

pub fn sidebar_links(role: UserRole) -> &'static [(&'static str, &'static str)] {
    match role {
        UserRole::Admin => &[
            ("State", "/Admin/state"),
            ("Manage Users", "/Admin/manage-user"),
            ("Manage Rides", "/Admin/manage-ride"),
            ("Manage Ratings", "/Admin/manage-rating"),
            ("Payments", "/Admin/payments"),
        ],
        UserRole::Rider => &[
            ("Profile", "/Rider/profile"),
            ("My Rides", "/Rider/manage-rider"),
            ("Book a Ride", "/bookRide"),
        ],
        UserRole::Driver => &[
            ("Profile", "/Driver/profile"),
            ("Manage Rides", "/Driver/manage-ride"),
            ("Completed Rides", "/Driver/complete-ride"),
        ],
    }
}

fn sidebar(user: Option<&SessionUser>, active: &str) -> String {
    let Some(user) = user else {
        return String::new();
    };

    let links: String = sidebar_links(user.role)
        .iter()
        .map(|(label, href)| {
            let class = if *href == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{href}\"{class}>{label}</a>")
        })
        .collect();

    format!(
        "<aside><a href=\"/\"><strong>TrackSy</strong></a>{links}\
<form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form></aside>"
    )
}

/// `TrackSy - Admin > state` style trail for a dashboard path.
pub fn breadcrumb(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("TrackSy - {}", segments.join(" > "))
}

/// Dashboard shell. The sidebar only renders links for the signed-in role.
pub fn dashboard(title: &str, chrome: &Chrome, active: &str, body: &str) -> String {
    let content = format!(
        "<div class=\"dash\">{sidebar}<div style=\"flex:1\">\
<div class=\"crumbs\">{crumbs}</div>{flash}<main>{body}</main></div></div>",
        sidebar = sidebar(chrome.user, active),
        crumbs = escape(&breadcrumb(active)),
        flash = flash_banner(chrome.flash),
    );
    document(title, "", &content)
}
