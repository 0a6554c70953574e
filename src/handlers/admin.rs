use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::entities::rating::RatingFilter;
use crate::error::AppResult;
use crate::handlers::{
    outcome_flash, redirect_with, FlashRedirect, PageContext, PageResponse, RecordId,
};
use crate::session::SessionContext;
use crate::utils::flash::Flash;
use crate::utils::pagination::{PageQuery, Pagination};
use crate::utils::validation;
use crate::views::admin as views;
use crate::AppState;

const USERS_PER_PAGE: u32 = 6;
const RIDES_PER_PAGE: u32 = 3;

pub async fn stats(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let stats = state.backend.admin_stats(&token).await?.into_data()?;

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::stats_page(&ctx.chrome(), &stats))))
}

/// Paged user list; a new search always starts from page 1 because the search
/// form does not carry a page.
pub async fn users(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let page = query.page();
    let search = query.search();

    let listing = state
        .backend
        .users(&token, page, USERS_PER_PAGE, search)
        .await?
        .into_data()?;
    let pager = Pagination::from_meta(page, listing.meta.as_ref());

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((
        jar,
        Html(views::users_page(
            &ctx.chrome(),
            &listing.data,
            &pager,
            search.unwrap_or_default(),
        )),
    ))
}

#[derive(Debug, Deserialize)]
pub struct VerifyForm {
    pub is_verify: bool,
}

pub async fn change_verification(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    RecordId(user_id): RecordId,
    Form(form): Form<VerifyForm>,
) -> AppResult<FlashRedirect> {
    let (admin, token) = session.require().await?;
    let success = if form.is_verify {
        "User verified successfully"
    } else {
        "User unverified successfully"
    };

    tracing::info!(admin = %admin.id, user_id = %user_id, verify = form.is_verify, "Changing verification");
    let flash = outcome_flash(
        state
            .backend
            .change_verification(&token, &user_id, form.is_verify)
            .await,
        success,
        "Failed to change verification",
    )?;
    Ok(redirect_with(jar, flash, "/Admin/manage-user"))
}

pub async fn delete_user(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    RecordId(user_id): RecordId,
) -> AppResult<FlashRedirect> {
    let (admin, token) = session.require().await?;

    tracing::info!(admin = %admin.id, user_id = %user_id, "Deleting user");
    let flash = outcome_flash(
        state.backend.delete_user(&token, &user_id).await,
        "User deleted successfully",
        "Failed to delete user",
    )?;
    Ok(redirect_with(jar, flash, "/Admin/manage-user"))
}

pub async fn rides(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let page = query.page();

    let listing = state
        .backend
        .all_rides(Some(&token), Some(page), Some(RIDES_PER_PAGE))
        .await?
        .into_data()?;
    let pager = Pagination::from_meta(page, listing.meta.as_ref());

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::rides_page(&ctx.chrome(), &listing.data, &pager))))
}

pub async fn ride_detail(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    RecordId(ride_id): RecordId,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let ride = state.backend.ride(Some(&token), &ride_id).await?.into_data()?;

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::ride_detail_page(&ctx.chrome(), &ride))))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DiscountForm {
    #[validate(email(message = "Please enter the rider's email address"))]
    pub email: String,
}

pub async fn send_discount(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    RecordId(ride_id): RecordId,
    Form(form): Form<DiscountForm>,
) -> AppResult<FlashRedirect> {
    let (_, token) = session.require().await?;
    let back = format!("/Admin/manage-ride/{}", ride_id);

    if let Err(errors) = form.validate() {
        return Ok(redirect_with(jar, Flash::error(validation::message(&errors)), &back));
    }

    let flash = outcome_flash(
        state.backend.send_discount_code(&token, form.email.trim()).await,
        "Discount OTP sent successfully!",
        "Failed to send OTP",
    )?;
    Ok(redirect_with(jar, flash, &back))
}

#[derive(Debug, Default, Deserialize)]
pub struct RatingQuery {
    #[serde(default)]
    pub search: String,
    pub score: Option<String>,
}

impl RatingQuery {
    pub fn filter(&self) -> RatingFilter {
        RatingFilter {
            search: self.search.trim().to_string(),
            score: self
                .score
                .as_deref()
                .and_then(|s| s.parse().ok())
                .filter(|s| (1..=5).contains(s)),
        }
    }
}

pub async fn ratings(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Query(query): Query<RatingQuery>,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let ratings = state.backend.ratings(&token).await?.into_data()?.into_vec();

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((
        jar,
        Html(views::ratings_page(&ctx.chrome(), &ratings, &query.filter())),
    ))
}

pub async fn payments(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let payments = state.backend.payments(&token).await?.into_data()?.into_vec();

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::payments_page(&ctx.chrome(), &payments))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_query_ignores_blank_or_out_of_range_scores() {
        let query = RatingQuery {
            search: "  late ".into(),
            score: Some(String::new()),
        };
        let filter = query.filter();
        assert_eq!(filter.search, "late");
        assert_eq!(filter.score, None);

        let query = RatingQuery {
            search: String::new(),
            score: Some("9".into()),
        };
        assert_eq!(query.filter().score, None);

        let query = RatingQuery {
            search: String::new(),
            score: Some("4".into()),
        };
        assert_eq!(query.filter().score, Some(4));
    }
}
