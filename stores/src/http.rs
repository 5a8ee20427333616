//! reqwest-backed backend client and the store sources built on it.
//!
//! Used natively: the proxy server forwards browser cookies through it, and
//! the CLI resolves stores with an explicit session token.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use serde::de::DeserializeOwned;

use crate::remote::{Credential, RemoteError, Source, is_absent_status, parse_record};
use crate::types::{LoginRequest, ProviderStatus, UserSession};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

const SESSION_PATH: &str = "auth/me";
const PROVIDER_STATUS_PATH: &str = "provider/status";
const LOGIN_PATH: &str = "auth/login";
const LOGOUT_PATH: &str = "auth/logout";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Successful login: the resolved session plus cookies to hand to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReply {
    pub session: UserSession,
    pub set_cookies: Vec<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

/// Thin HTTP wrapper around the marketplace backend's auth endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client rooted at `base_url` (e.g. `https://api.example.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeouts: Timeouts) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| RemoteError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `GET auth/me`: who owns this credential?
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unexpected status, or a body
    /// that is not a valid `UserSession`.
    pub async fn current_session(&self, credential: &Credential) -> Result<Option<UserSession>, RemoteError> {
        self.get_optional(SESSION_PATH, credential).await
    }

    /// `GET provider/status`: plan standing of the signed-in provider.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unexpected status, or a body
    /// that is not a valid `ProviderStatus`.
    pub async fn provider_status(&self, credential: &Credential) -> Result<Option<ProviderStatus>, RemoteError> {
        self.get_optional(PROVIDER_STATUS_PATH, credential).await
    }

    /// `POST auth/login`. `Ok(None)` when the backend rejects the credentials.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unexpected status, or a
    /// malformed session body.
    pub async fn login(&self, request: &LoginRequest) -> Result<Option<LoginReply>, RemoteError> {
        let response = self
            .http
            .post(self.endpoint(LOGIN_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if is_absent_status(status) {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(RemoteError::Status { status });
        }

        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        Ok(parse_record::<UserSession>(&text)?.map(|session| LoginReply { session, set_cookies }))
    }

    /// `POST auth/logout`. An already-dead session counts as success.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a server-side failure status.
    pub async fn logout(&self, credential: &Credential) -> Result<(), RemoteError> {
        let Some(cookie) = credential.cookie_header() else {
            return Ok(());
        };
        let response = self
            .http
            .post(self.endpoint(LOGOUT_PATH))
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if response.status().is_success() || is_absent_status(status) {
            Ok(())
        } else {
            Err(RemoteError::Status { status })
        }
    }

    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: &Credential,
    ) -> Result<Option<T>, RemoteError> {
        if !credential.is_present() {
            return Ok(None);
        }

        let mut request = self.http.get(self.endpoint(path));
        if let Some(cookie) = credential.cookie_header() {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if is_absent_status(status) {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(RemoteError::Status { status });
        }

        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        parse_record(&text)
    }
}

// =============================================================================
// SOURCES
// =============================================================================

/// Session source for native stores.
#[derive(Debug, Clone)]
pub struct SessionSource(pub HttpBackend);

impl Source for SessionSource {
    type Output = UserSession;

    async fn fetch(&self, credential: &Credential) -> Result<Option<UserSession>, RemoteError> {
        self.0.current_session(credential).await
    }
}

/// Provider-status source for native stores.
#[derive(Debug, Clone)]
pub struct ProviderStatusSource(pub HttpBackend);

impl Source for ProviderStatusSource {
    type Output = ProviderStatus;

    async fn fetch(&self, credential: &Credential) -> Result<Option<ProviderStatus>, RemoteError> {
        self.0.provider_status(credential).await
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

