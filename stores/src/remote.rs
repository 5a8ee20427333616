//! Remote resolution interface shared by every store.
//!
//! ERROR HANDLING
//! ==============
//! `Ok(None)` is a definite "no session / no status" answer from the backend.
//! `Err` covers everything that kept us from getting an answer. Stores absorb
//! both into an absent value; the split only feeds logs and UI messaging.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use std::future::Future;

use serde::de::DeserializeOwned;

/// Cookie carrying the backend session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Credential presented to the backend on a resolution call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// Browser-managed cookie jar; the request is sent with credentials included.
    Ambient,
    /// Raw `Cookie` header value forwarded as-is.
    Cookie(String),
}

impl Credential {
    /// Credential for a bare session token.
    #[must_use]
    pub fn session_token(token: &str) -> Self {
        Self::Cookie(format!("{SESSION_COOKIE}={token}"))
    }

    /// `Cookie` header to attach, or `None` when the browser attaches it.
    #[must_use]
    pub fn cookie_header(&self) -> Option<&str> {
        match self {
            Self::Ambient => None,
            Self::Cookie(raw) if raw.trim().is_empty() => None,
            Self::Cookie(raw) => Some(raw.as_str()),
        }
    }

    /// Whether a request with this credential can possibly authenticate.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Ambient) || self.cookie_header().is_some()
    }
}

/// Errors produced while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl RemoteError {
    /// Failures that mean "this credential is not signed in".
    #[must_use]
    pub fn is_signed_out(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403 })
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599 })
    }
}

/// Whether an HTTP status is a definite "nobody is signed in" answer.
#[must_use]
pub fn is_absent_status(status: u16) -> bool {
    matches!(status, 401 | 403 | 404)
}

/// Parse a resolution body. An empty body or JSON `null` means "absent".
///
/// # Errors
///
/// Returns [`RemoteError::Parse`] when the body does not match `T`.
pub fn parse_record<T: DeserializeOwned>(text: &str) -> Result<Option<T>, RemoteError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| RemoteError::Parse(e.to_string()))
}

/// One logical remote call resolving a record for a credential.
///
/// Implementations are stateless request/response adapters; they do not know
/// which store drives them.
pub trait Source {
    type Output;

    /// Resolve the record for `credential`.
    fn fetch(&self, credential: &Credential) -> impl Future<Output = Result<Option<Self::Output>, RemoteError>>;
}
