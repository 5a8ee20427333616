//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded route applies identical redirect behavior: once a gate
//! resolves to `Unauthorized`, replace the current history entry with the
//! gate's target.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;
use stores::Gate;

/// Where to navigate for `gate`, or `None` when there is nothing to do
/// (still resolving, authorized, or already on the target page).
pub fn redirect_for(gate: Gate, current_path: &str) -> Option<&'static str> {
    gate.redirect().filter(|target| *target != current_path.trim_end_matches('/'))
}

/// Navigate away whenever `gate` resolves to `Unauthorized`.
pub fn install_gate_redirect<F>(gate: Memo<Gate>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let pathname = use_location().pathname;
    Effect::new(move || {
        let gate = gate.get();
        if let Some(target) = redirect_for(gate, &pathname.get_untracked()) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
