use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::payment::PaymentOutcome;
use crate::error::{AppError, AppResult};
use crate::handlers::{PageContext, PageResponse};
use crate::session::SessionContext;
use crate::views::auth::payment_result_page;
use crate::AppState;

/// Landing page for the payment gateway's redirect. The gateway's query
/// parameters are relayed to the backend unchanged.
pub async fn callback(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Path(outcome): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<PageResponse> {
    let outcome = PaymentOutcome::from_slug(&outcome)
        .ok_or_else(|| AppError::NotFound("Unknown payment outcome".to_string()))?;

    let message = match state.backend.report_payment(outcome, &params).await {
        Ok(envelope) => envelope.message_or(outcome.headline()),
        Err(e) => {
            tracing::warn!(outcome = outcome.slug(), error = %e, "Payment callback not acknowledged");
            e.public_message()
        }
    };

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(payment_result_page(&ctx.chrome(), outcome, &message))))
}
