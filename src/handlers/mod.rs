pub mod admin;
pub mod auth;
pub mod booking;
pub mod driver;
pub mod geo;
pub mod payment;
pub mod public;
pub mod rider;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::{check_record_id, ApiResponse};
use crate::error::{AppError, AppResult};
use crate::session::{SessionContext, SessionUser};
use crate::utils::flash::Flash;
use crate::views::Chrome;

pub type PageResponse = (CookieJar, Html<String>);
pub type FlashRedirect = (CookieJar, Redirect);

/// A backend record id from the last path segment, refused unless it is a plain token.
#[derive(Debug, Clone)]
pub struct RecordId(pub String);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Page not found".to_string()))?;
        check_record_id(&id)?;
        Ok(RecordId(id))
    }
}

/// Session user and pending flash for rendering one page.
pub struct PageContext {
    pub user: Option<SessionUser>,
    pub flash: Option<Flash>,
}

impl PageContext {
    /// Reads the session and consumes the flash cookie.
    pub async fn load(session: &SessionContext, jar: CookieJar) -> (CookieJar, Self) {
        let (jar, flash) = Flash::take(jar);
        let user = session.user().await;
        (jar, Self { user, flash })
    }

    pub fn chrome(&self) -> Chrome<'_> {
        Chrome::new(self.user.as_ref(), self.flash.as_ref())
    }
}

pub fn redirect_with(jar: CookieJar, flash: Flash, to: &str) -> FlashRedirect {
    (flash.set(jar), Redirect::to(to))
}

/// Turns the outcome of a backend mutation into a flash message.
///
/// Rejections by the backend, whether as a `success: false` envelope or an
/// error status, become error flashes; so does an unreachable backend. Only
/// failures on our side propagate.
pub fn outcome_flash<T>(
    result: AppResult<ApiResponse<T>>,
    success: &str,
    failure: &str,
) -> AppResult<Flash> {
    match result {
        Ok(envelope) if envelope.success => Ok(Flash::success(envelope.message_or(success))),
        Ok(envelope) => Ok(Flash::error(envelope.message_or(failure))),
        Err(AppError::Backend { message, .. }) if !message.is_empty() => Ok(Flash::error(message)),
        Err(AppError::Backend { .. }) => Ok(Flash::error(failure)),
        Err(e @ AppError::Upstream(_)) => {
            tracing::warn!(error = %e, "Backend unreachable");
            Ok(Flash::error(e.public_message()))
        }
        Err(e) => Err(e),
    }
}
