//! Login pages for the consumer and provider portals.
//!
//! On success the stores are refreshed (the session cookie just changed) and
//! the user lands on their role's home route.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use stores::{LoginRequest, Role};

use crate::state::session::ClientStores;

/// Trim and require both fields, producing the request to submit.
pub fn validate_login_input(email: &str, password: &str, role: Role) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned(), role })
}

/// Portal heading for `role`.
pub fn login_title(role: Role) -> &'static str {
    match role {
        Role::Provider => "Provider sign in",
        Role::Consumer => "Sign in",
    }
}

#[component]
pub fn ConsumerLoginPage() -> impl IntoView {
    view! { <LoginPage role=Role::Consumer/> }
}

#[component]
pub fn ProviderLoginPage() -> impl IntoView {
    view! { <LoginPage role=Role::Provider/> }
}

#[component]
pub fn LoginPage(role: Role) -> impl IntoView {
    let stores = expect_context::<Arc<ClientStores>>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login_input(&email.get(), &password.get(), role) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let stores = stores.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&request).await {
                    Ok(user) => {
                        log::info!("signed in as user {} ({})", user.id, user.role.as_str());
                        crate::state::session::reload(&stores).await;
                        password.set(String::new());
                        navigate(user.role.home_path(), leptos_router::NavigateOptions::default());
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, &stores, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Glowmarket"</h1>
                <p class="login-card__subtitle">{login_title(role)}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
