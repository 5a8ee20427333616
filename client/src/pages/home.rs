//! Public landing page.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use stores::Role;

use crate::state::session::SessionSignals;

/// Landing page. Links into each portal; greets a signed-in user.
#[component]
pub fn HomePage() -> impl IntoView {
    let signals = expect_context::<SessionSignals>();
    let greeting = move || signals.user().map(|user| format!("Welcome back, {}.", user.name));
    let portal = move || signals.user().map(|user| user.role.home_path());

    view! {
        <section class="home-page">
            <h1>"Glowmarket"</h1>
            <p>"Book health and beauty services near you."</p>
            {move || match (greeting(), portal()) {
                (Some(greeting), Some(href)) => {
                    view! {
                        <p class="home-page__greeting">
                            {greeting} " " <a href=href>"Go to your dashboard"</a>
                        </p>
                    }
                        .into_any()
                }
                _ => {
                    view! {
                        <nav class="home-page__portals">
                            <a class="login-button" href=Role::Consumer.login_path()>"Sign in to book"</a>
                            <a class="login-button" href=Role::Provider.login_path()>"Provider sign in"</a>
                        </nav>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
