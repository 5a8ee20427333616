//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the same-origin JSON API the browser stores talk to and
//! stitches it with Leptos SSR rendering under a single Axum router. The API
//! is a thin relay: session semantics live in the backend.

pub mod auth;
pub mod provider;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use stores::RemoteError;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API consumed by the browser stores.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/provider/status", get(provider::status))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// API routes + Leptos SSR + hydration assets under `/pkg`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing
/// `[[workspace.metadata.leptos]]` section or `LEPTOS_*` env vars).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

/// Map a backend failure onto the status the browser sees.
pub(crate) fn upstream_failure(what: &str, error: &RemoteError) -> StatusCode {
    let status = match error {
        RemoteError::Status { status: 401 | 403 } => StatusCode::UNAUTHORIZED,
        RemoteError::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RemoteError::Request(_) | RemoteError::Status { .. } | RemoteError::Parse(_) => StatusCode::BAD_GATEWAY,
    };
    if error.retryable() {
        tracing::warn!(%what, error = %error, "backend unavailable");
    } else {
        tracing::error!(%what, error = %error, "backend call failed");
    }
    status
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
