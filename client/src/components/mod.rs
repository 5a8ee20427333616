//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read session state from the `SessionSignals` context provided
//! by `App`; none of them fetch on their own.

pub mod logout_button;
pub mod plan_badge;
pub mod route_guard;
