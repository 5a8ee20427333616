//! The application's session-derived stores and the flows that span both.
//!
//! ARCHITECTURE
//! ============
//! `AppStores` is an explicit context object handed to whoever needs it
//! (Leptos context, CLI command, tests). It owns:
//!
//! - the session store and its initializer
//! - the provider-status store and its initializer
//!
//! The stores never observe each other. Sequencing (provider status only for
//! provider sessions) and logout (clear both) live here.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use time::OffsetDateTime;

use crate::guard::{Gate, PlanGuard, RouteGuard};
use crate::initializer::Initializer;
use crate::remote::{Credential, Source};
use crate::store::Store;
use crate::types::{ProviderStatus, Role, UserSession};

pub struct AppStores<SS, PS>
where
    SS: Source<Output = UserSession>,
    PS: Source<Output = ProviderStatus>,
{
    pub session: Store<SS>,
    pub provider_status: Store<PS>,
    session_init: Initializer,
    provider_status_init: Initializer,
}

impl<SS, PS> AppStores<SS, PS>
where
    SS: Source<Output = UserSession>,
    PS: Source<Output = ProviderStatus>,
{
    #[must_use]
    pub fn new(session_source: SS, provider_status_source: PS) -> Self {
        Self {
            session: Store::new("session", session_source),
            provider_status: Store::new("provider_status", provider_status_source),
            session_init: Initializer::new(),
            provider_status_init: Initializer::new(),
        }
    }

    /// Startup step: warm each store at most once per application lifetime.
    ///
    /// Safe to call from every place that needs the stores warm; only the
    /// first call for each store reaches the network. Provider status is only
    /// requested once the session resolves to a provider.
    pub async fn bootstrap(&self, credential: &Credential) {
        if self.session_init.trigger() {
            self.session.fetch_if_needed(credential).await;
        }
        if self.session_has_role(Role::Provider) && self.provider_status_init.trigger() {
            self.provider_status.fetch_if_needed(credential).await;
        }
    }

    /// Explicit retry path (after login, on manual refresh).
    pub async fn refresh(&self, credential: &Credential) {
        self.session.fetch_if_needed(credential).await;
        if self.session_has_role(Role::Provider) {
            self.provider_status.fetch_if_needed(credential).await;
        }
    }

    /// Forget whatever the stores hold and resolve them again (after login).
    ///
    /// Unlike `refresh`, a stored value or an in-flight fetch started under
    /// the old credential does not short-circuit the new fetch.
    pub async fn reload(&self, credential: &Credential) {
        self.session.clear();
        self.provider_status.clear();
        self.refresh(credential).await;
    }

    /// Drop every session-derived value. No network call.
    pub fn logout(&self) {
        self.session.clear();
        self.provider_status.clear();
        tracing::info!("session stores cleared");
    }

    #[must_use]
    pub fn session_has_role(&self, role: Role) -> bool {
        self.session.value().is_some_and(|user| user.has_role(role))
    }

    #[must_use]
    pub fn route_gate(&self, guard: RouteGuard) -> Gate {
        guard.evaluate(&self.session.state())
    }

    /// Gate for plan-restricted provider areas: the role gate first, then the plan.
    #[must_use]
    pub fn plan_gate(&self, now: OffsetDateTime) -> Gate {
        match self.route_gate(RouteGuard::new(Role::Provider)) {
            Gate::Authorized => PlanGuard.evaluate(&self.provider_status.state(), now),
            other => other,
        }
    }
}
