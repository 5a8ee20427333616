//! Networking for the same-origin JSON API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the browser-side `Source` implementations the stores resolve
//! through, plus the login/logout calls that change the session cookie.

pub mod api;
