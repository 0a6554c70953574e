use axum::{response::Html, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::handlers::{PageContext, PageResponse};
use crate::session::SessionContext;
use crate::views::public;

pub async fn home(session: SessionContext, jar: CookieJar) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    (jar, Html(public::home_page(&ctx.chrome())))
}

pub async fn about(session: SessionContext, jar: CookieJar) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    (jar, Html(public::about_page(&ctx.chrome())))
}

pub async fn contact(session: SessionContext, jar: CookieJar) -> PageResponse {
    let (jar, ctx) = PageContext::load(&session, jar).await;
    (jar, Html(public::contact_page(&ctx.chrome())))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
