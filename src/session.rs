//! Per-request view of who is signed in.
//!
//! A [`SessionContext`] starts out `Loading`, is filled from the `accessToken`
//! cookie by the session middleware, and can be refetched after login or
//! logout within the same request. Handlers and views only read it.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use tokio::sync::RwLock;

use crate::entities::user::UserRole;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::{decode_access_token, TokenTrust};

pub use crate::utils::jwt::Claims as SessionUser;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

#[derive(Debug, Clone)]
enum SessionState {
    Loading,
    Ready {
        user: Option<SessionUser>,
        token: Option<String>,
    },
}

#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    trust: Arc<TokenTrust>,
}

impl SessionContext {
    pub fn new(trust: TokenTrust) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::Loading)),
            trust: Arc::new(trust),
        }
    }

    /// Re-reads the access token from `jar`. A missing or undecodable token
    /// leaves the session signed out; it is never an error.
    pub async fn refetch(&self, jar: &CookieJar) -> Option<SessionUser> {
        let token = jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty());

        let user = token.as_deref().and_then(|t| {
            decode_access_token(t, &self.trust)
                .map_err(|e| tracing::debug!(error = %e, "Ignoring access token"))
                .ok()
        });

        let mut state = self.state.write().await;
        *state = SessionState::Ready {
            user: user.clone(),
            // A token that does not decode is not forwarded either.
            token: user.as_ref().and(token),
        };
        user
    }

    pub async fn is_loading(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Loading)
    }

    pub async fn user(&self) -> Option<SessionUser> {
        match &*self.state.read().await {
            SessionState::Ready { user, .. } => user.clone(),
            SessionState::Loading => None,
        }
    }

    pub async fn role(&self) -> Option<UserRole> {
        self.user().await.map(|u| u.role)
    }

    /// The raw access token, forwarded verbatim to the backend.
    pub async fn token(&self) -> Option<String> {
        match &*self.state.read().await {
            SessionState::Ready { token, .. } => token.clone(),
            SessionState::Loading => None,
        }
    }

    /// Non-blocking id lookup for synchronous callers such as rate-limit key extraction.
    pub fn try_user_id(&self) -> Option<String> {
        match &*self.state.try_read().ok()? {
            SessionState::Ready { user: Some(user), .. } => Some(user.id.clone()),
            _ => None,
        }
    }

    /// Signed-in user and token, or `Unauthorized`.
    pub async fn require(&self) -> AppResult<(SessionUser, String)> {
        match &*self.state.read().await {
            SessionState::Ready {
                user: Some(user),
                token: Some(token),
            } => Ok((user.clone(), token.clone())),
            _ => Err(AppError::Unauthorized("Please sign in first".to_string())),
        }
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session middleware is not installed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Cookie;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn jar_with(token: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, token.to_string()))
    }

    fn token(role: &str) -> String {
        let claims = serde_json::json!({
            "userId": "u-42",
            "email": "driver@tracksy.app",
            "role": role,
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap()
    }

    #[tokio::test]
    async fn starts_loading_then_resolves() {
        let session = SessionContext::new(TokenTrust::Unverified);
        assert!(session.is_loading().await);

        let user = session.refetch(&jar_with(&token("Driver"))).await;
        assert!(!session.is_loading().await);
        assert_eq!(user.map(|u| u.role), Some(UserRole::Driver));
        assert!(session.token().await.is_some());
    }

    #[tokio::test]
    async fn bad_token_means_signed_out() {
        let session = SessionContext::new(TokenTrust::Unverified);
        assert!(session.refetch(&jar_with("garbage")).await.is_none());
        assert!(session.token().await.is_none());
        assert!(matches!(session.require().await, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn refetch_picks_up_logout() {
        let session = SessionContext::new(TokenTrust::Unverified);
        session.refetch(&jar_with(&token("Rider"))).await;
        assert!(session.user().await.is_some());

        session.refetch(&CookieJar::new()).await;
        assert!(session.user().await.is_none());
    }
}
