//! # client
//!
//! Leptos + WASM frontend for the marketplace's session-aware routes.
//!
//! Session and provider-status state live in `stores::AppStores`; this crate
//! mirrors that state into signals, gates routes on it, and renders the
//! login, account and provider pages.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
