//! Server-rendered HTML. Every dynamic value passes through [`escape`].

pub mod admin;
pub mod auth;
pub mod booking;
pub mod components;
pub mod driver;
pub mod layout;
pub mod public;
pub mod rider;

use axum::http::StatusCode;

use crate::utils::html::escape;

pub use layout::Chrome;

/// Bare error page; it does not depend on the session so it can render anywhere.
pub fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{code} | TrackSy</title>\
<style>{css}</style></head><body><main class=\"error\">\
<h1>{code}</h1><p>{message}</p><p><a href=\"/\">Back to home</a></p>\
</main></body></html>",
        code = status.as_u16(),
        css = layout::STYLES,
        message = escape(message),
    )
}
