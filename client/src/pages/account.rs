//! Consumer account page.

use leptos::prelude::*;
use stores::Role;

use crate::components::logout_button::LogoutButton;
use crate::components::route_guard::RoleGate;
use crate::state::session::SessionSignals;

/// Consumer-only account overview.
#[component]
pub fn AccountPage() -> impl IntoView {
    view! {
        <RoleGate role=Role::Consumer>
            <AccountDetails/>
        </RoleGate>
    }
}

#[component]
fn AccountDetails() -> impl IntoView {
    let signals = expect_context::<SessionSignals>();
    let name = move || signals.user().map(|user| user.name).unwrap_or_default();
    let email = move || signals.user().map(|user| user.email).unwrap_or_default();

    view! {
        <section class="account-page">
            <h1>"Your account"</h1>
            <dl>
                <dt>"Name"</dt>
                <dd>{name}</dd>
                <dt>"Email"</dt>
                <dd>{email}</dd>
            </dl>
            <LogoutButton/>
        </section>
    }
}
