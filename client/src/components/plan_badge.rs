//! Header badge summarizing the provider's plan.

#[cfg(test)]
#[path = "plan_badge_test.rs"]
mod plan_badge_test;

use leptos::prelude::*;
use stores::{PlanStatus, ProviderStatus};
use time::OffsetDateTime;

use crate::state::session::SessionSignals;

/// Badge text, e.g. `Trial (3 days left)` or `Active`.
pub fn plan_badge_text(status: &ProviderStatus, now: OffsetDateTime) -> String {
    match status.trial_days_left(now) {
        Some(0) => format!("{} (ended)", status.plan_status.label()),
        Some(1) => format!("{} (1 day left)", status.plan_status.label()),
        Some(days) => format!("{} ({days} days left)", status.plan_status.label()),
        None => status.plan_status.label().to_owned(),
    }
}

/// CSS modifier for the badge.
pub fn plan_badge_class(status: &ProviderStatus, now: OffsetDateTime) -> &'static str {
    if !status.grants_access(now) {
        return "plan-badge plan-badge--inactive";
    }
    match status.plan_status {
        PlanStatus::Trial => "plan-badge plan-badge--trial",
        _ => "plan-badge",
    }
}

/// Renders nothing unless a provider status has resolved.
#[component]
pub fn PlanBadge() -> impl IntoView {
    let signals = expect_context::<SessionSignals>();
    let status = move || signals.provider_status.with(|state| state.value.clone());

    move || {
        status().map(|status| {
            let now = OffsetDateTime::now_utc();
            view! { <span class=plan_badge_class(&status, now)>{plan_badge_text(&status, now)}</span> }
        })
    }
}
