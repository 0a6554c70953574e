use axum::{
    extract::State,
    response::Html,
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::backend::user::UpdateProfileRequest;
use crate::entities::rating::CreateRatingRequest;
use crate::entities::ride::RideAction;
use crate::error::AppResult;
use crate::handlers::{
    outcome_flash, redirect_with, FlashRedirect, PageContext, PageResponse, RecordId,
};
use crate::session::SessionContext;
use crate::utils::flash::Flash;
use crate::utils::serde_ext::lenient_u8;
use crate::utils::validation::{self, not_blank};
use crate::views::rider as views;
use crate::AppState;

pub async fn profile(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
) -> AppResult<PageResponse> {
    let (me, token) = session.require().await?;

    let (user, count) = tokio::join!(
        state.backend.user(&token, &me.id),
        state.backend.ride_count(&token),
    );
    let user = user?.into_data()?;
    // The count is decorative; a failure shows zero rather than breaking the page.
    let ride_count = match count.and_then(|c| c.into_data()) {
        Ok(count) => count.ride_count,
        Err(e) => {
            tracing::warn!(error = %e, "Ride count unavailable");
            0
        }
    };

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::profile_page(&ctx.chrome(), &user, ride_count))))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

pub async fn update_profile(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Form(form): Form<ProfileForm>,
) -> AppResult<FlashRedirect> {
    let (me, token) = session.require().await?;

    if let Err(errors) = form.validate() {
        let flash = Flash::error(validation::message(&errors));
        return Ok(redirect_with(jar, flash, "/Rider/profile"));
    }
    let phone = form.phone.trim();
    let payload = UpdateProfileRequest {
        name: Some(form.name.trim().to_string()),
        phone: (!phone.is_empty()).then(|| phone.to_string()),
    };

    let flash = outcome_flash(
        state.backend.update_user(&token, &me.id, &payload).await,
        "Profile updated successfully!",
        "Update failed",
    )?;
    Ok(redirect_with(jar, flash, "/Rider/profile"))
}

pub async fn rides(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let rides = state.backend.my_rides(&token).await?.into_data()?.into_vec();

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::rides_page(&ctx.chrome(), &rides))))
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

/// The backend refuses to cancel anything past `requested`; its message is shown as is.
pub async fn cancel_ride(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    RecordId(ride_id): RecordId,
) -> AppResult<FlashRedirect> {
    let (me, token) = session.require().await?;

    tracing::info!(rider = %me.id, ride_id = %ride_id, "Cancelling ride");
    let flash = outcome_flash(
        state
            .backend
            .transition_ride(&token, RideAction::Cancel, &ride_id)
            .await,
        "Ride cancelled",
        "Failed to cancel ride",
    )?;
    Ok(redirect_with(jar, flash, "/Rider/manage-rider"))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RatingForm {
    #[validate(custom(function = "not_blank", message = "This ride has no driver to rate"))]
    pub to: String,
    #[serde(default, deserialize_with = "lenient_u8")]
    #[validate(
        required(message = "Please choose a score"),
        range(min = 1, max = 5, message = "Score must be between 1 and 5")
    )]
    pub score: Option<u8>,
    #[serde(default)]
    pub comment: String,
}

pub async fn rate_ride(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    RecordId(ride_id): RecordId,
    Form(form): Form<RatingForm>,
) -> AppResult<FlashRedirect> {
    let (_, token) = session.require().await?;
    let back = format!("/Rider/manage-rider/{}", ride_id);

    if let Err(errors) = form.validate() {
        return Ok(redirect_with(jar, Flash::error(validation::message(&errors)), &back));
    }
    let Some(score) = form.score else {
        return Ok(redirect_with(jar, Flash::error("Please choose a score"), &back));
    };

    let payload = CreateRatingRequest {
        ride: ride_id,
        to: form.to,
        score,
        comment: form.comment.trim().to_string(),
    };
    let flash = outcome_flash(
        state.backend.create_rating(&token, &payload).await,
        "Thanks for rating your driver",
        "Failed to submit rating",
    )?;
    Ok(redirect_with(jar, flash, &back))
}
