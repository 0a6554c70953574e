use crate::backend::payment::PaymentOutcome;
use crate::entities::vehicle::VEHICLE_KINDS;
use crate::utils::html::escape;
use crate::views::layout::{page, Chrome};

pub fn login_page(chrome: &Chrome, redirect: &str, email: &str) -> String {
    let body = format!(
        "<h1>Welcome back</h1><p>Sign in to your TrackSy account</p>\
<form method=\"post\" action=\"/login\">\
<input type=\"hidden\" name=\"redirect\" value=\"{redirect}\">\
<label>Email <input type=\"email\" name=\"email\" required value=\"{email}\"></label>\
<label>Password <input type=\"password\" name=\"password\" required minlength=\"6\"></label>\
<button type=\"submit\">Login</button></form>\
<p><a href=\"/forgot-password\">Forgot your password?</a></p>\
<p><a class=\"button\" href=\"/auth/google\">Login with Google</a></p>\
<p>Don&#39;t have an account? <a href=\"/register\">Sign up</a></p>",
        redirect = escape(redirect),
        email = escape(email),
    );
    page("Login", chrome, &body)
}

pub fn register_choice_page(chrome: &Chrome) -> String {
    let body = "<h1>Join TrackSy</h1><div class=\"cards\">\
<div class=\"card\"><h3>Ride with us</h3><p>Book rides and track them live.</p>\
<a class=\"button\" href=\"/register-rider\">Register as Rider</a></div>\
<div class=\"card\"><h3>Drive with us</h3><p>Accept rides and earn on your schedule.</p>\
<a class=\"button\" href=\"/register-driver\">Register as Driver</a></div></div>\
<p>Already registered? <a href=\"/login\">Sign in</a></p>";
    page("Register", chrome, body)
}

const ACCOUNT_FIELDS: &str = "<label>Full Name <input name=\"name\" required></label>\
<label>Email <input type=\"email\" name=\"email\" required></label>\
<label>Phone <input name=\"phone\" required></label>\
<label>Password <input type=\"password\" name=\"password\" required minlength=\"6\"></label>";

pub fn register_rider_page(chrome: &Chrome) -> String {
    let body = format!(
        "<h1>Rider Registration</h1>\
<form method=\"post\" action=\"/register-rider\" enctype=\"multipart/form-data\">{ACCOUNT_FIELDS}\
<label>Profile Photo <input type=\"file\" name=\"file\" accept=\"image/*\"></label>\
<button type=\"submit\">Register</button></form>"
    );
    page("Rider Registration", chrome, &body)
}

pub fn vehicle_kind_options() -> String {
    VEHICLE_KINDS
        .iter()
        .map(|kind| format!("<option value=\"{kind}\">{kind}</option>"))
        .collect()
}

pub fn register_driver_page(chrome: &Chrome) -> String {
    let body = format!(
        "<h1>Driver Registration</h1>\
<form method=\"post\" action=\"/register-driver\" enctype=\"multipart/form-data\">{ACCOUNT_FIELDS}\
<h2>Vehicle</h2>\
<label>Model <input name=\"model\" required></label>\
<label>Year <input type=\"number\" name=\"year\" required></label>\
<label>Max Capacity <input type=\"number\" name=\"maxCapacity\" required></label>\
<label>Type <select name=\"type\" required>{kinds}</select></label>\
<label>License Number <input name=\"licenseNumber\" required></label>\
<label>Your Photo <input type=\"file\" name=\"personPhoto\" accept=\"image/*\"></label>\
<label>Car Photo <input type=\"file\" name=\"carPhoto\" accept=\"image/*\"></label>\
<button type=\"submit\">Register</button></form>",
        kinds = vehicle_kind_options(),
    );
    page("Driver Registration", chrome, &body)
}

/// First step asks for the email; once an OTP has been sent the reset form is shown.
pub fn forgot_password_page(chrome: &Chrome, otp_sent_to: Option<&str>) -> String {
    let body = match otp_sent_to {
        None => "<h1>Forgot password</h1>\
<form method=\"post\" action=\"/forgot-password\">\
<label>Email <input type=\"email\" name=\"email\" required></label>\
<button type=\"submit\">Send OTP</button></form>"
            .to_string(),
        Some(email) => format!(
            "<h1>Reset password</h1><p>We sent a code to {email}.</p>\
<form method=\"post\" action=\"/reset-password\">\
<input type=\"hidden\" name=\"email\" value=\"{email}\">\
<label>OTP <input name=\"otp\" required></label>\
<label>New password <input type=\"password\" name=\"new_password\" required minlength=\"6\"></label>\
<button type=\"submit\">Reset password</button></form>",
            email = escape(email),
        ),
    };
    page("Forgot password", chrome, &body)
}

pub fn payment_result_page(chrome: &Chrome, outcome: PaymentOutcome, message: &str) -> String {
    let body = format!(
        "<section class=\"error\"><h1>{headline}</h1><p>{message}</p>\
<p><a href=\"/\">Back to home</a></p></section>",
        headline = outcome.headline(),
        message = escape(message),
    );
    page(outcome.headline(), chrome, &body)
}
