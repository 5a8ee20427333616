//! Provider routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;
use stores::ProviderStatus;

use super::auth::session_credential;
use super::upstream_failure;
use crate::state::AppState;

/// `GET /api/provider/status`: plan standing of the signed-in provider.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Result<Json<ProviderStatus>, StatusCode> {
    let credential = session_credential(&state, &jar);
    match state.upstream.provider_status(&credential).await {
        Ok(Some(status)) => Ok(Json(status)),
        Ok(None) => Err(StatusCode::UNAUTHORIZED),
        Err(e) => Err(upstream_failure("provider status", &e)),
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
