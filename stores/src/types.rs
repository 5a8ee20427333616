//! Wire records resolved from the marketplace backend.
//!
//! DESIGN
//! ======
//! The enums are closed: an unknown `role` or `planStatus` fails
//! deserialization, and the store treats that failure as "absent". A present
//! `UserSession` therefore always carries a known role.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

const SECONDS_PER_DAY: i64 = 86_400;

/// Account role of the signed-in user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sells services (salons, clinics, practitioners).
    Provider,
    /// Books services.
    Consumer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Consumer => "consumer",
        }
    }

    /// Login entry point for users of this role.
    #[must_use]
    pub const fn login_path(self) -> &'static str {
        match self {
            Self::Provider => "/provider/login",
            Self::Consumer => "/login",
        }
    }

    /// Landing route after a successful login.
    #[must_use]
    pub const fn home_path(self) -> &'static str {
        match self {
            Self::Provider => "/provider",
            Self::Consumer => "/account",
        }
    }
}

/// A role name that is neither `provider` nor `consumer`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0} (expected provider or consumer)")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "provider" => Ok(Self::Provider),
            "consumer" => Ok(Self::Consumer),
            _ => Err(UnknownRole(raw.trim().to_owned())),
        }
    }
}

/// Subscription standing of a provider account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Trial,
    Free,
    Active,
    Expired,
    Canceled,
}

impl PlanStatus {
    /// Human-readable badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trial => "Trial",
            Self::Free => "Free",
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Canceled => "Canceled",
        }
    }
}

/// The authenticated identity behind the caller's credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Backend user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email. Older backends omit it for providers.
    #[serde(default)]
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Plan tag echoed on provider sessions, if the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_status: Option<PlanStatus>,
}

impl UserSession {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Contact block embedded in a provider status response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderContact {
    pub name: String,
    pub email: String,
}

/// Plan and onboarding standing of a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub plan_status: PlanStatus,
    /// Only meaningful while `plan_status` is `Trial`; use [`Self::trial_expires_at`].
    #[serde(default, with = "time::serde::rfc3339::option", rename = "trialExpiresAt")]
    pub trial_expiry: Option<OffsetDateTime>,
    pub has_active_plan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderContact>,
}

impl ProviderStatus {
    /// Trial expiry, ignored unless the plan is a trial.
    #[must_use]
    pub fn trial_expires_at(&self) -> Option<OffsetDateTime> {
        match self.plan_status {
            PlanStatus::Trial => self.trial_expiry,
            _ => None,
        }
    }

    /// Time left on the trial, negative once it has lapsed.
    #[must_use]
    pub fn trial_remaining(&self, now: OffsetDateTime) -> Option<Duration> {
        self.trial_expires_at().map(|expiry| expiry - now)
    }

    /// Whole days left on the trial, rounded up and clamped at zero.
    #[must_use]
    pub fn trial_days_left(&self, now: OffsetDateTime) -> Option<i64> {
        self.trial_remaining(now).map(|remaining| {
            let seconds = remaining.whole_seconds().max(0);
            (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
        })
    }

    #[must_use]
    pub fn trial_expired(&self, now: OffsetDateTime) -> bool {
        self.trial_expires_at().is_some_and(|expiry| expiry <= now)
    }

    /// Whether provider-only areas that need a plan should open.
    #[must_use]
    pub fn grants_access(&self, now: OffsetDateTime) -> bool {
        self.has_active_plan && !self.trial_expired(now)
    }
}

/// Credentials submitted by the login form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Which login entry point the form was submitted from.
    pub role: Role,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
