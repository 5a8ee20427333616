//! Route gating decisions over store state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layout components evaluate a guard on every state change and render from
//! the resulting [`Gate`]. Guards hold no state, so re-evaluating after a
//! session flips from present to absent closes the gate again.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use time::OffsetDateTime;

use crate::store::StoreState;
use crate::types::{ProviderStatus, Role, UserSession};

/// Plan selection page for providers without an active plan.
pub const PLANS_PATH: &str = "/provider/plans";

/// Outcome of evaluating a guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Store unresolved or loading: show a placeholder, decide nothing yet.
    Initializing,
    /// Resolved without access: navigate to `redirect`, never render content.
    Unauthorized { redirect: &'static str },
    /// Resolved with access: render the protected subtree.
    Authorized,
}

impl Gate {
    #[must_use]
    pub fn redirect(self) -> Option<&'static str> {
        match self {
            Self::Unauthorized { redirect } => Some(redirect),
            Self::Initializing | Self::Authorized => None,
        }
    }

    #[must_use]
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// Placeholder text rendered instead of protected content.
    #[must_use]
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Initializing => Some("Loading..."),
            Self::Unauthorized { .. } => Some("Redirecting..."),
            Self::Authorized => None,
        }
    }
}

/// Role gate over the session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    required: Role,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(required: Role) -> Self {
        Self { required }
    }

    #[must_use]
    pub const fn required(self) -> Role {
        self.required
    }

    #[must_use]
    pub fn evaluate(self, session: &StoreState<UserSession>) -> Gate {
        if session.is_pending() {
            return Gate::Initializing;
        }
        match &session.value {
            Some(user) if user.has_role(self.required) => Gate::Authorized,
            _ => Gate::Unauthorized { redirect: self.required.login_path() },
        }
    }
}

/// Active-plan gate over the provider status store.
///
/// Always nested inside a provider [`RouteGuard`]; it only decides whether the
/// signed-in provider may use plan-restricted areas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanGuard;

impl PlanGuard {
    #[must_use]
    pub fn evaluate(self, status: &StoreState<ProviderStatus>, now: OffsetDateTime) -> Gate {
        if status.is_pending() {
            return Gate::Initializing;
        }
        match &status.value {
            None => Gate::Unauthorized { redirect: Role::Provider.login_path() },
            Some(status) if status.grants_access(now) => Gate::Authorized,
            Some(_) => Gate::Unauthorized { redirect: PLANS_PATH },
        }
    }
}
