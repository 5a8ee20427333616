//! Auth routes: session lookup, login relay, logout.
//!
//! The proxy never trusts its own notion of who is signed in. Every call
//! forwards the browser's session cookie to the backend and relays the answer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use stores::{Credential, LoginRequest, UserSession};
use time::Duration;

use super::upstream_failure;
use crate::config::CookieSettings;
use crate::state::AppState;

/// Backend credential for the request's session cookie.
pub(crate) fn session_credential(state: &AppState, jar: &CookieJar) -> Credential {
    state.credential_for(jar.get(&state.cookie.name).map(Cookie::value))
}

fn session_cookie(settings: &CookieSettings, token: String) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build()
}

/// Pull the session token out of the backend's `Set-Cookie` headers.
pub(crate) fn session_token_from(set_cookies: &[String], name: &str) -> Option<String> {
    set_cookies
        .iter()
        .filter_map(|raw| Cookie::parse(raw.as_str()).ok())
        .find(|cookie| cookie.name() == name && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_owned())
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me`: current user, or 401 when nobody is signed in.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Result<Json<UserSession>, StatusCode> {
    let credential = session_credential(&state, &jar);
    match state.upstream.current_session(&credential).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(StatusCode::UNAUTHORIZED),
        Err(e) => Err(upstream_failure("session", &e)),
    }
}

/// `POST /api/auth/login`: exchange credentials, then re-issue the backend's
/// session token as our own `HttpOnly` cookie.
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    let reply = match state.upstream.login(&request).await {
        Ok(Some(reply)) => reply,
        Ok(None) => return StatusCode::UNAUTHORIZED.into_response(),
        Err(e) => return upstream_failure("login", &e).into_response(),
    };

    if reply.session.role != request.role {
        tracing::info!(
            user_id = reply.session.id,
            expected = request.role.as_str(),
            actual = reply.session.role.as_str(),
            "login rejected: wrong portal for role"
        );
        return StatusCode::FORBIDDEN.into_response();
    }

    let Some(token) = session_token_from(&reply.set_cookies, &state.cookie.name) else {
        tracing::error!(user_id = reply.session.id, "backend login succeeded without a session cookie");
        return StatusCode::BAD_GATEWAY.into_response();
    };

    tracing::info!(user_id = reply.session.id, role = reply.session.role.as_str(), "login succeeded");
    let jar = CookieJar::new().add(session_cookie(&state.cookie, token));
    (jar, Json(reply.session)).into_response()
}

/// `POST /api/auth/logout`: end the backend session, clear the cookie.
///
/// The cookie is cleared even if the backend call fails; the browser must
/// end up signed out either way.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let credential = session_credential(&state, &jar);
    if let Err(e) = state.upstream.logout(&credential).await {
        tracing::warn!(error = %e, "backend logout failed");
    }

    let mut cookie = session_cookie(&state.cookie, String::new());
    cookie.set_max_age(Duration::ZERO);

    let jar = CookieJar::new().add(cookie);
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
