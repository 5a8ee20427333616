//! # stores
//!
//! Lazily-resolved, deduplicated client state derived from the marketplace
//! backend: the signed-in user session and the provider plan status.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client (`client`), the proxy server and the `cli` companion all
//! build on the same pieces:
//!
//! - `types`: wire records (`UserSession`, `ProviderStatus`)
//! - `remote`: the `Source` trait and explicit `Credential`
//! - `store`: `Store<S>`, the single-writer state container with
//!   fetch-if-needed deduplication
//! - `initializer`: fire-once bootstrap triggers
//! - `guard`: route gating decisions over store state
//! - `app`: the pair of stores plus bootstrap / refresh / logout coordination
//! - `http` (feature `http`): reqwest-backed sources for native callers

pub mod app;
pub mod guard;
#[cfg(feature = "http")]
pub mod http;
pub mod initializer;
pub mod remote;
pub mod store;
#[cfg(test)]
pub(crate) mod test_helpers;
pub mod types;

pub use app::AppStores;
pub use guard::{Gate, PlanGuard, RouteGuard};
pub use remote::{Credential, RemoteError, Source};
pub use store::{Absence, Store, StoreState};
pub use types::{LoginRequest, PlanStatus, ProviderContact, ProviderStatus, Role, UnknownRole, UserSession};
