//! The marketplace backend as seen by the proxy routes.
//!
//! Handlers hold an `Arc<dyn Upstream>` so tests can swap in a canned
//! backend without a network.

use stores::http::{HttpBackend, LoginReply};
use stores::{Credential, LoginRequest, ProviderStatus, RemoteError, UserSession};

/// Backend auth surface. `Ok(None)` means the backend definitively said
/// "nobody is signed in" (or rejected the login).
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    /// Resolve the session owning `credential`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] when no answer could be obtained.
    async fn current_session(&self, credential: &Credential) -> Result<Option<UserSession>, RemoteError>;

    /// Resolve the plan status of the provider owning `credential`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] when no answer could be obtained.
    async fn provider_status(&self, credential: &Credential) -> Result<Option<ProviderStatus>, RemoteError>;

    /// Exchange login credentials for a backend session.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] when no answer could be obtained.
    async fn login(&self, request: &LoginRequest) -> Result<Option<LoginReply>, RemoteError>;

    /// End the backend session owning `credential`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] when the backend failed to answer.
    async fn logout(&self, credential: &Credential) -> Result<(), RemoteError>;
}

#[async_trait::async_trait]
impl Upstream for HttpBackend {
    async fn current_session(&self, credential: &Credential) -> Result<Option<UserSession>, RemoteError> {
        HttpBackend::current_session(self, credential).await
    }

    async fn provider_status(&self, credential: &Credential) -> Result<Option<ProviderStatus>, RemoteError> {
        HttpBackend::provider_status(self, credential).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Option<LoginReply>, RemoteError> {
        HttpBackend::login(self, request).await
    }

    async fn logout(&self, credential: &Credential) -> Result<(), RemoteError> {
        HttpBackend::logout(self, credential).await
    }
}
