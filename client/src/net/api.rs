//! REST API helpers for communicating with the proxy server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`; the browser attaches
//! the session cookie itself, so only `Credential::Ambient` is meaningful here.
//! Server-side (SSR): stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Resolution calls return `RemoteError` for the stores to absorb. Login
//! returns a user-facing message string.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use stores::{Credential, LoginRequest, ProviderStatus, RemoteError, Source, UserSession};

pub const SESSION_ENDPOINT: &str = "/api/auth/me";
pub const PROVIDER_STATUS_ENDPOINT: &str = "/api/provider/status";
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(status: u16) -> String {
    match status {
        401 => "Incorrect email or password.".to_owned(),
        403 => "This account cannot sign in here.".to_owned(),
        _ => format!("login failed: {status}"),
    }
}

/// Session source backed by `GET /api/auth/me`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSession;

impl Source for BrowserSession {
    type Output = UserSession;

    async fn fetch(&self, credential: &Credential) -> Result<Option<UserSession>, RemoteError> {
        get_record(SESSION_ENDPOINT, credential).await
    }
}

/// Provider-status source backed by `GET /api/provider/status`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserProviderStatus;

impl Source for BrowserProviderStatus {
    type Output = ProviderStatus;

    async fn fetch(&self, credential: &Credential) -> Result<Option<ProviderStatus>, RemoteError> {
        get_record(PROVIDER_STATUS_ENDPOINT, credential).await
    }
}

async fn get_record<T: serde::de::DeserializeOwned>(url: &str, credential: &Credential) -> Result<Option<T>, RemoteError> {
    #[cfg(feature = "hydrate")]
    {
        if !credential.is_present() {
            return Ok(None);
        }
        let resp = gloo_net::http::Request::get(url)
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        let status = resp.status();
        if stores::remote::is_absent_status(status) {
            return Ok(None);
        }
        if !resp.ok() {
            return Err(RemoteError::Status { status });
        }
        let text = resp.text().await.map_err(|e| RemoteError::Request(e.to_string()))?;
        stores::remote::parse_record(&text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, credential);
        Err(RemoteError::Request("not available on server".to_owned()))
    }
}

/// Sign in via `POST /api/auth/login`. The server sets the session cookie.
///
/// # Errors
///
/// Returns a user-facing message if the request fails or is rejected.
pub async fn login(request: &LoginRequest) -> Result<UserSession, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(login_failed_message(resp.status()));
        }
        resp.json::<UserSession>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = gloo_net::http::Request::post(LOGOUT_ENDPOINT).send().await {
            log::warn!("logout request failed: {e}");
        }
    }
}
