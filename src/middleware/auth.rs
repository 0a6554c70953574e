use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::entities::user::UserRole;
use crate::session::SessionContext;
use crate::utils::html::with_query;
use crate::AppState;

const AUTH_ROUTES: [&str; 2] = ["/login", "/register"];

/// Resolve the signed-in user from cookies and make the session available to handlers.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = SessionContext::new(state.config.token_trust());
    session.refetch(&jar).await;
    request.extensions_mut().insert(session);
    next.run(request).await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectLogin { redirect: String },
    RedirectHome,
}

impl GuardDecision {
    pub fn location(&self) -> Option<String> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectLogin { redirect } => {
                Some(with_query("/login", &[("redirect", redirect.as_str())]))
            }
            GuardDecision::RedirectHome => Some("/".to_string()),
        }
    }
}

fn under_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn is_guarded(path: &str) -> bool {
    AUTH_ROUTES.contains(&path)
        || UserRole::ALL
            .iter()
            .any(|role| under_prefix(path, role.dashboard_prefix()))
}

/// Decide what to do with a request for `path` given the signed-in role.
///
/// Signed-out visitors may only reach the auth pages; everyone else is sent to
/// login with the path they wanted. Signed-in users may only enter their own
/// dashboard, which also keeps them off the auth pages.
pub fn guard_decision(path: &str, role: Option<UserRole>) -> GuardDecision {
    if !is_guarded(path) {
        return GuardDecision::Allow;
    }

    match role {
        None if AUTH_ROUTES.contains(&path) => GuardDecision::Allow,
        None => GuardDecision::RedirectLogin {
            redirect: path.to_string(),
        },
        Some(role) if under_prefix(path, role.dashboard_prefix()) => GuardDecision::Allow,
        Some(_) => GuardDecision::RedirectHome,
    }
}

/// Redirects unauthenticated and wrong-role page requests.
pub async fn route_guard(session: SessionContext, request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let decision = guard_decision(&path, session.role().await);
    match decision.location() {
        None => next.run(request).await,
        Some(location) => {
            tracing::debug!(path = %path, ?decision, "Route guard redirect");
            Redirect::to(&location).into_response()
        }
    }
}
