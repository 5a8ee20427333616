//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::plan_badge::PlanBadge;
use crate::pages::{
    account::AccountPage,
    home::HomePage,
    login::{ConsumerLoginPage, ProviderLoginPage},
    provider::{PlansPage, ProviderDashboardPage},
};
use crate::state::session::{bootstrap, provide_session_stores};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session stores as context and kicks off their one-time
/// resolution. Guarded routes show a placeholder until it lands.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let stores = provide_session_stores();
    bootstrap(stores);

    view! {
        <Stylesheet id="leptos" href="/pkg/glowmarket.css"/>
        <Title text="Glowmarket"/>

        <Router>
            <header class="site-header">
                <a class="site-header__brand" href="/">"Glowmarket"</a>
                <PlanBadge/>
            </header>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=ConsumerLoginPage/>
                    <Route path=StaticSegment("account") view=AccountPage/>
                    <Route path=StaticSegment("provider") view=ProviderDashboardPage/>
                    <Route path=(StaticSegment("provider"), StaticSegment("login")) view=ProviderLoginPage/>
                    <Route path=(StaticSegment("provider"), StaticSegment("plans")) view=PlansPage/>
                </Routes>
            </main>
        </Router>
    }
}
