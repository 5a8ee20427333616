//! Route guards: render protected children only once their gate authorizes.
//!
//! While a store is unresolved the guard shows a placeholder and never
//! redirects. A resolved denial redirects and never renders the children.
//! Gates are memos over the mirrored store signals, so a later `logout()`
//! flips an authorized guard back to a redirect without remounting.
//!
//! `PlanGate` reads the clock only when the provider status signal changes.
//! A trial that lapses while the page stays mounted keeps the gate open until
//! the next store change or navigation remounts the guard. There is no timer.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use stores::{Gate, PlanGuard, Role, RouteGuard};
use time::OffsetDateTime;

use crate::state::session::SessionSignals;
use crate::util::auth::install_gate_redirect;

/// Require a signed-in session with `role`.
#[component]
pub fn RoleGate(role: Role, children: ChildrenFn) -> impl IntoView {
    let signals = expect_context::<SessionSignals>();
    let guard = RouteGuard::new(role);
    let gate = Memo::new(move |_| signals.session.with(|state| guard.evaluate(state)));
    install_gate_redirect(gate, use_navigate());

    gated(gate, children)
}

/// Require a provider plan that currently grants access. Nest inside a
/// provider `RoleGate`.
#[component]
pub fn PlanGate(children: ChildrenFn) -> impl IntoView {
    let signals = expect_context::<SessionSignals>();
    let gate = Memo::new(move |_| {
        signals.provider_status.with(|state| PlanGuard.evaluate(state, OffsetDateTime::now_utc()))
    });
    install_gate_redirect(gate, use_navigate());

    gated(gate, children)
}

fn gated(gate: Memo<Gate>, children: ChildrenFn) -> impl IntoView {
    view! {
        <Show
            when=move || gate.get().is_authorized()
            fallback=move || {
                view! {
                    <div class="route-guard">
                        <p class="route-guard__message">{move || gate.get().placeholder().unwrap_or_default()}</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
