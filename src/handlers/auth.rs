use axum::{
    extract::{Multipart, Query, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use reqwest::multipart::Form as UploadForm;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::backend::auth::{LoginRequest, Registration, ResetPasswordRequest, SendOtpRequest};
use crate::error::{AppError, AppResult};
use crate::handlers::{outcome_flash, redirect_with, FlashRedirect, PageContext, PageResponse};
use crate::session::{SessionContext, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::utils::flash::{Flash, FlashKind};
use crate::utils::geo::LatLng;
use crate::utils::html::with_query;
use crate::utils::multipart::FormUpload;
use crate::utils::validation::{self, not_blank};
use crate::views::auth as views;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    pub redirect: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Only same-site paths are followed after login.
pub fn safe_redirect(target: Option<&str>) -> &str {
    match target {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

fn login_url(redirect: &str) -> String {
    if redirect == "/" {
        "/login".to_string()
    } else {
        with_query("/login", &[("redirect", redirect)])
    }
}

fn token_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

pub async fn login_page(
    session: SessionContext,
    jar: CookieJar,
    Query(query): Query<RedirectQuery>,
) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    let redirect = safe_redirect(query.redirect.as_deref());
    (jar, Html(views::login_page(&ctx.chrome(), redirect, "")))
}

pub async fn login(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<FlashRedirect> {
    let redirect = safe_redirect(form.redirect.as_deref()).to_string();
    let back = login_url(&redirect);

    if let Err(errors) = form.validate() {
        return Ok(redirect_with(jar, Flash::error(validation::message(&errors)), &back));
    }

    let payload = LoginRequest {
        email: form.email,
        password: form.password,
    };

    let tokens = match state.backend.login(&payload).await {
        Ok(envelope) if envelope.success => envelope.into_data().ok(),
        Ok(envelope) => {
            let message = envelope.message_or("User Login Failed");
            return Ok(redirect_with(jar, Flash::error(message), &back));
        }
        Err(AppError::Backend { message, .. }) => {
            return Ok(redirect_with(jar, Flash::error(message), &back));
        }
        Err(e) => return Err(e),
    };

    let Some(tokens) = tokens else {
        return Ok(redirect_with(jar, Flash::error("User Login Failed"), &back));
    };

    let secure = state.config.cookie_secure;
    let mut jar = jar.add(token_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token, secure));
    if let Some(refresh) = tokens.refresh_token {
        jar = jar.add(token_cookie(REFRESH_TOKEN_COOKIE, refresh, secure));
    }

    match session.refetch(&jar).await {
        Some(user) => tracing::info!(user_id = %user.id, role = %user.role, "User logged in"),
        None => tracing::warn!("Backend issued an access token that does not decode"),
    }

    Ok(redirect_with(jar, Flash::success("User Login done"), &redirect))
}

pub async fn logout(session: SessionContext, jar: CookieJar) -> FlashRedirect {
    let jar = jar
        .remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"));
    session.refetch(&jar).await;
    redirect_with(jar, Flash::success("Logged out"), "/")
}

pub async fn google_login(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.backend.google_login_url())
}

pub async fn register_page(session: SessionContext, jar: CookieJar) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    (jar, Html(views::register_choice_page(&ctx.chrome())))
}

pub async fn register_rider_page(session: SessionContext, jar: CookieJar) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    (jar, Html(views::register_rider_page(&ctx.chrome())))
}

pub async fn register_driver_page(session: SessionContext, jar: CookieJar) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    (jar, Html(views::register_driver_page(&ctx.chrome())))
}

/// Account fields shared by every registration form.
#[derive(Debug, Serialize, Validate)]
pub struct AccountFields {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl AccountFields {
    fn from_upload(upload: &FormUpload) -> Self {
        let text = |name: &str| upload.field(name).unwrap_or_default().trim().to_string();
        Self {
            name: text("name"),
            email: text("email"),
            phone: text("phone"),
            password: upload.field("password").unwrap_or_default().to_string(),
        }
    }
}

/// The `data` part of a driver sign-up: account, first vehicle and the
/// profile defaults a new driver starts with.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DriverFields {
    #[serde(flatten)]
    pub account: AccountFields,
    #[validate(custom(function = "not_blank", message = "Model is required"))]
    pub model: String,
    #[validate(required(message = "Year must be a number"))]
    pub year: Option<u16>,
    #[validate(
        required(message = "Max capacity must be a number"),
        range(min = 1, message = "Max capacity must be at least 1")
    )]
    pub max_capacity: Option<u16>,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank", message = "Vehicle type is required"))]
    pub kind: String,
    #[validate(custom(function = "not_blank", message = "License number is required"))]
    pub license_number: String,
    pub status: &'static str,
    pub rating: u32,
    pub accepted_ride: u32,
    pub location: LatLng,
}

impl DriverFields {
    fn from_upload(upload: &FormUpload, location: LatLng) -> Self {
        let text = |name: &str| upload.field(name).unwrap_or_default().trim().to_string();
        let number = |name: &str| upload.field(name).and_then(|v| v.trim().parse().ok());
        Self {
            account: AccountFields::from_upload(upload),
            model: text("model"),
            year: number("year"),
            max_capacity: number("maxCapacity"),
            kind: text("type"),
            license_number: text("licenseNumber"),
            status: "available",
            rating: 0,
            accepted_ride: 0,
            location,
        }
    }
}

fn data_part<T: Serialize>(fields: &T) -> AppResult<UploadForm> {
    let data = serde_json::to_string(fields)
        .map_err(|e| AppError::Internal(format!("Failed to encode registration: {}", e)))?;
    Ok(UploadForm::new().text("data", data))
}

fn rider_form(mut upload: FormUpload) -> AppResult<UploadForm> {
    let account = AccountFields::from_upload(&upload);
    account.validate()?;

    let mut form = data_part(&account)?;
    if let Some(photo) = upload.take_file("file") {
        form = form.part("file", photo.into_part()?);
    }
    Ok(form)
}

fn driver_form(mut upload: FormUpload, state: &AppState) -> AppResult<UploadForm> {
    let driver = DriverFields::from_upload(&upload, state.config.map_center);
    driver.account.validate()?;
    driver.validate()?;

    let mut form = data_part(&driver)?;
    // The backend reads `files[0]` as the driver and `files[1]` as the car.
    for field in ["personPhoto", "carPhoto"] {
        if let Some(photo) = upload.take_file(field) {
            form = form.part("files", photo.into_part()?);
        }
    }
    Ok(form)
}

async fn register(
    state: &AppState,
    kind: Registration,
    form: AppResult<UploadForm>,
    jar: CookieJar,
    retry: &str,
    success: &str,
    failure: &str,
) -> AppResult<FlashRedirect> {
    let form = match form {
        Ok(form) => form,
        Err(AppError::BadRequest(message)) => {
            return Ok(redirect_with(jar, Flash::error(message), retry));
        }
        Err(e) => return Err(e),
    };

    let flash = outcome_flash(state.backend.register(kind, form).await, success, failure)?;
    let target = if flash.kind == FlashKind::Success { "/login" } else { retry };
    Ok(redirect_with(jar, flash, target))
}

pub async fn register_rider(
    State(state): State<AppState>,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<FlashRedirect> {
    let upload = FormUpload::read(multipart).await?;
    register(
        &state,
        Registration::Rider,
        rider_form(upload),
        jar,
        "/register-rider",
        "Rider Registered Successfully!",
        "Registration Failed!",
    )
    .await
}

pub async fn register_driver(
    State(state): State<AppState>,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<FlashRedirect> {
    let upload = FormUpload::read(multipart).await?;
    let form = driver_form(upload, &state);
    register(
        &state,
        Registration::Driver,
        form,
        jar,
        "/register-driver",
        "Driver Registered Successfully!",
        "Driver Registration Failed!",
    )
    .await
}

#[derive(Debug, Default, Deserialize)]
pub struct ForgotQuery {
    pub email: Option<String>,
}

pub async fn forgot_password_page(
    session: SessionContext,
    jar: CookieJar,
    Query(query): Query<ForgotQuery>,
) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    let sent_to = query.email.as_deref().filter(|e| !e.trim().is_empty());
    (jar, Html(views::forgot_password_page(&ctx.chrome(), sent_to)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

pub async fn send_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SendOtpForm>,
) -> AppResult<FlashRedirect> {
    if let Err(errors) = form.validate() {
        let flash = Flash::error(validation::message(&errors));
        return Ok(redirect_with(jar, flash, "/forgot-password"));
    }

    let payload = SendOtpRequest { email: form.email };
    let flash = outcome_flash(
        state.backend.send_reset_otp(&payload).await,
        "OTP sent to your email",
        "Failed to send OTP",
    )?;
    let target = match flash.kind {
        FlashKind::Success => with_query("/forgot-password", &[("email", payload.email.as_str())]),
        FlashKind::Error => "/forgot-password".to_string(),
    };
    Ok(redirect_with(jar, flash, &target))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordForm {
    pub email: String,
    #[validate(custom(function = "not_blank", message = "OTP is required"))]
    pub otp: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ResetPasswordForm>,
) -> AppResult<FlashRedirect> {
    let retry = with_query("/forgot-password", &[("email", form.email.as_str())]);

    if let Err(errors) = form.validate() {
        return Ok(redirect_with(jar, Flash::error(validation::message(&errors)), &retry));
    }

    let payload = ResetPasswordRequest {
        email: form.email.trim().to_string(),
        otp: form.otp.trim().to_string(),
        new_password: form.new_password,
    };
    let flash = outcome_flash(
        state.backend.reset_password(&payload).await,
        "Password reset. Please sign in.",
        "Password reset failed",
    )?;
    let target = if flash.kind == FlashKind::Success { "/login" } else { retry.as_str() };
    Ok(redirect_with(jar, flash, target))
}
