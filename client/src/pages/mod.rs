//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates gating and
//! shared chrome to `components`.

pub mod account;
pub mod home;
pub mod login;
pub mod provider;
