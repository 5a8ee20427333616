//! Mock sources and fixtures shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use time::macros::datetime;
use tokio::sync::Notify;

use crate::remote::{Credential, RemoteError, Source};
use crate::types::{PlanStatus, ProviderStatus, Role, UserSession};

/// Source that replays queued outcomes and counts calls.
///
/// Each call suspends once (or until `gate` is notified) before answering, so
/// concurrent callers get a chance to run while the first is in flight.
pub(crate) struct MockSource<T> {
    calls: AtomicUsize,
    replies: Mutex<VecDeque<Result<Option<T>, RemoteError>>>,
    gate: Option<Arc<Notify>>,
    credentials: Mutex<Vec<Credential>>,
}

impl<T> MockSource<T> {
    pub(crate) fn new(replies: Vec<Result<Option<T>, RemoteError>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            replies: Mutex::new(replies.into()),
            gate: None,
            credentials: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn gated(gate: Arc<Notify>, replies: Vec<Result<Option<T>, RemoteError>>) -> Self {
        Self { gate: Some(gate), ..Self::new(replies) }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn seen_credentials(&self) -> Vec<Credential> {
        self.credentials.lock().unwrap().clone()
    }
}

impl<T> Source for MockSource<T> {
    type Output = T;

    async fn fetch(&self, credential: &Credential) -> Result<Option<T>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.credentials.lock().unwrap().push(credential.clone());
        match &self.gate {
            Some(gate) => gate.notified().await,
            None => tokio::task::yield_now().await,
        }
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

pub(crate) fn consumer_session() -> UserSession {
    UserSession {
        id: 1,
        name: "A".into(),
        email: "a@x.com".into(),
        role: Role::Consumer,
        plan_status: None,
    }
}

pub(crate) fn provider_session() -> UserSession {
    UserSession {
        id: 2,
        name: "Glow Studio".into(),
        email: "studio@x.com".into(),
        role: Role::Provider,
        plan_status: Some(PlanStatus::Active),
    }
}

pub(crate) fn active_status() -> ProviderStatus {
    ProviderStatus {
        plan_status: PlanStatus::Active,
        trial_expiry: None,
        has_active_plan: true,
        provider: None,
    }
}

pub(crate) fn lapsed_trial_status() -> ProviderStatus {
    ProviderStatus {
        plan_status: PlanStatus::Trial,
        trial_expiry: Some(datetime!(2026-10-01 00:00 UTC)),
        has_active_plan: true,
        provider: None,
    }
}
