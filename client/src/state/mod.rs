//! Shared client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the `AppStores` instance for the page and mirrors each
//! store into a signal so components re-render on every state change.

pub mod session;
