//! Sign-out button shared by the account and provider pages.

use std::sync::Arc;

use leptos::prelude::*;

use crate::state::session::ClientStores;

/// Ends the backend session, then clears both stores. Guards on the current
/// page react to the cleared session and redirect to the role's login page.
#[component]
pub fn LogoutButton() -> impl IntoView {
    let stores = expect_context::<Arc<ClientStores>>();
    let busy = RwSignal::new(false);

    let on_click = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let stores = stores.clone();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            stores.logout();
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = stores;
        }
    };

    view! {
        <button class="logout-button" type="button" on:click=on_click disabled=move || busy.get()>
            "Sign out"
        </button>
    }
}
