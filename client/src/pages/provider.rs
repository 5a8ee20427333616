//! Provider portal pages: the plan-gated dashboard and plan selection.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use leptos::prelude::*;
use stores::{PlanStatus, ProviderStatus, Role};
use time::OffsetDateTime;

use crate::components::logout_button::LogoutButton;
use crate::components::plan_badge::PlanBadge;
use crate::components::route_guard::{PlanGate, RoleGate};
use crate::state::session::SessionSignals;

/// Why the plans page is being shown.
pub fn plans_headline(status: Option<&ProviderStatus>, now: OffsetDateTime) -> &'static str {
    match status {
        None => "Choose a plan to start accepting bookings.",
        Some(status) if status.trial_expired(now) => "Your free trial has ended.",
        Some(status) if status.grants_access(now) => "You're all set. Change plans any time.",
        Some(status) => match status.plan_status {
            PlanStatus::Canceled => "Your plan was canceled.",
            PlanStatus::Expired => "Your plan has expired.",
            PlanStatus::Trial | PlanStatus::Free | PlanStatus::Active => {
                "Choose a plan to start accepting bookings."
            }
        },
    }
}

/// Provider dashboard: requires a provider session and a plan granting access.
#[component]
pub fn ProviderDashboardPage() -> impl IntoView {
    view! {
        <RoleGate role=Role::Provider>
            <PlanGate>
                <ProviderDashboard/>
            </PlanGate>
        </RoleGate>
    }
}

#[component]
fn ProviderDashboard() -> impl IntoView {
    let signals = expect_context::<SessionSignals>();
    let business = move || {
        signals
            .provider_status
            .with(|state| state.value.as_ref().and_then(|s| s.provider.as_ref()).map(|p| p.name.clone()))
            .or_else(|| signals.user().map(|user| user.name))
            .unwrap_or_default()
    };

    view! {
        <section class="provider-page">
            <h1>{business}</h1>
            <PlanBadge/>
            <p>"Manage your services, availability and bookings."</p>
            <LogoutButton/>
        </section>
    }
}

/// Plan selection. Provider-only but deliberately not plan-gated: this is
/// where the plan gate sends providers without access.
#[component]
pub fn PlansPage() -> impl IntoView {
    view! {
        <RoleGate role=Role::Provider>
            <PlanSummary/>
        </RoleGate>
    }
}

#[component]
fn PlanSummary() -> impl IntoView {
    let signals = expect_context::<SessionSignals>();
    let headline = move || {
        signals.provider_status.with(|state| plans_headline(state.value.as_ref(), OffsetDateTime::now_utc()))
    };

    view! {
        <section class="plans-page">
            <h1>"Plans"</h1>
            <PlanBadge/>
            <p class="plans-page__headline">{headline}</p>
            <LogoutButton/>
        </section>
    }
}
