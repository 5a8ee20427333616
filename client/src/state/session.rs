//! Store context and signal mirrors for the current browser session.
//!
//! DESIGN
//! ======
//! `AppStores` is the single writer. Each store's watch channel is drained
//! into a `RwSignal` by a local task, so components read plain signals and
//! never touch the stores directly except to trigger refresh or logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;
use stores::{AppStores, ProviderStatus, Source, Store, StoreState, UserSession};

use crate::net::api::{BrowserProviderStatus, BrowserSession};

pub type ClientStores = AppStores<BrowserSession, BrowserProviderStatus>;

/// Reactive copies of both stores' state.
#[derive(Clone, Copy)]
pub struct SessionSignals {
    pub session: RwSignal<StoreState<UserSession>>,
    pub provider_status: RwSignal<StoreState<ProviderStatus>>,
}

impl SessionSignals {
    /// Signed-in user, if resolved.
    pub fn user(&self) -> Option<UserSession> {
        self.session.with(|state| state.value.clone())
    }
}

#[must_use]
pub fn new_client_stores() -> ClientStores {
    AppStores::new(BrowserSession, BrowserProviderStatus)
}

/// Create the stores, mirror them into signals, and provide both as context.
pub fn provide_session_stores() -> Arc<ClientStores> {
    let stores = Arc::new(new_client_stores());
    let signals = SessionSignals {
        session: RwSignal::new(stores.session.state()),
        provider_status: RwSignal::new(stores.provider_status.state()),
    };
    mirror(&stores.session, signals.session);
    mirror(&stores.provider_status, signals.provider_status);

    provide_context(stores.clone());
    provide_context(signals);
    stores
}

/// Push every state change of `store` into `signal`.
fn mirror<S>(store: &Store<S>, signal: RwSignal<StoreState<S::Output>>)
where
    S: Source,
    S::Output: Clone + Send + Sync + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let mut changes = store.subscribe();
        leptos::task::spawn_local(async move {
            while changes.changed().await.is_ok() {
                let snapshot = changes.borrow_and_update().clone();
                signal.set(snapshot);
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, signal);
    }
}

/// Resolve the session (and provider status for providers) once per page load.
pub fn bootstrap(stores: Arc<ClientStores>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        stores.bootstrap(&stores::Credential::Ambient).await;
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = stores;
    }
}

/// Re-resolve both stores after the session cookie changed (e.g. login).
pub async fn reload(stores: &ClientStores) {
    stores.reload(&stores::Credential::Ambient).await;
}
