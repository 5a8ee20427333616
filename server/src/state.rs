//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! proxy keeps no session data of its own: it holds the backend handle and
//! the cookie settings used when relaying the session cookie.

use std::sync::Arc;

use stores::Credential;

use crate::config::CookieSettings;
use crate::upstream::Upstream;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    pub cookie: Arc<CookieSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: Arc<dyn Upstream>, cookie: CookieSettings) -> Self {
        Self { upstream, cookie: Arc::new(cookie) }
    }

    /// Backend credential for a browser session token. Blank tokens produce a
    /// credential that is not present, so the backend is never asked.
    #[must_use]
    pub fn credential_for(&self, token: Option<&str>) -> Credential {
        match token.map(str::trim) {
            Some(token) if !token.is_empty() => Credential::Cookie(format!("{}={token}", self.cookie.name)),
            _ => Credential::Cookie(String::new()),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
