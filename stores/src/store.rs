//! Single-writer state container with fetch-if-needed deduplication.
//!
//! DESIGN
//! ======
//! State lives in a `tokio::sync::watch` channel. Claiming the in-flight slot
//! is a check-and-set under the channel's lock (`send_if_modified`), so N
//! concurrent `fetch_if_needed` calls issue exactly one remote call whether
//! the caller runs on a browser event loop or a multi-threaded runtime.
//!
//! `clear()` advances a generation counter. A fetch claimed under an older
//! generation drops its result, so a logout is never undone by a response that
//! was already on the wire.
//!
//! TRADE-OFFS
//! ==========
//! The store has no timeout of its own. A hung source keeps `is_loading` set
//! until the source gives up; native HTTP sources carry client timeouts.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tokio::sync::watch;

use crate::remote::{Credential, RemoteError, Source};

/// Why a resolved store holds no value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Absence {
    /// The backend said nobody is signed in, or the store was cleared.
    SignedOut,
    /// The backend could not be reached or failed.
    Unreachable,
    /// The backend answered with a body we could not read.
    Malformed,
}

impl Absence {
    fn from_error(err: &RemoteError) -> Self {
        match err {
            e if e.is_signed_out() => Self::SignedOut,
            RemoteError::Parse(_) => Self::Malformed,
            RemoteError::Request(_) | RemoteError::Status { .. } | RemoteError::ClientBuild(_) => Self::Unreachable,
        }
    }
}

/// Snapshot of a store: `{ value, is_loading }` plus resolution bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreState<T> {
    pub value: Option<T>,
    pub is_loading: bool,
    /// Set once any resolution or `clear()` has happened.
    pub resolved: bool,
    /// Reason the value is absent after a resolution; `None` while present.
    pub absence: Option<Absence>,
    generation: u64,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self { value: None, is_loading: false, resolved: false, absence: None, generation: 0 }
    }
}

impl<T> StoreState<T> {
    /// Resolved state holding `value`.
    #[must_use]
    pub fn present(value: T) -> Self {
        Self { value: Some(value), is_loading: false, resolved: true, absence: None, generation: 0 }
    }

    /// Resolved state with no value.
    #[must_use]
    pub fn absent(absence: Absence) -> Self {
        Self { value: None, is_loading: false, resolved: true, absence: Some(absence), generation: 0 }
    }

    /// State while the first resolution is in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self { is_loading: true, ..Self::default() }
    }

    /// No decision can be made from this state yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.is_loading || !self.resolved
    }

    /// Take the in-flight slot unless a value is present or a fetch already holds it.
    fn claim(&mut self) -> Option<u64> {
        if self.value.is_some() || self.is_loading {
            return None;
        }
        self.is_loading = true;
        Some(self.generation)
    }

    /// Apply a fetch outcome. Returns `false` when the claim went stale.
    fn settle(&mut self, generation: u64, outcome: Result<Option<T>, RemoteError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.is_loading = false;
        self.resolved = true;
        match outcome {
            Ok(Some(value)) => {
                self.value = Some(value);
                self.absence = None;
            }
            Ok(None) => {
                self.value = None;
                self.absence = Some(Absence::SignedOut);
            }
            Err(e) => {
                self.value = None;
                self.absence = Some(Absence::from_error(&e));
            }
        }
        true
    }

    /// Give the slot back without resolving (the fetch future was dropped).
    fn release(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.is_loading {
            return false;
        }
        self.is_loading = false;
        true
    }

    fn reset(&mut self) {
        self.value = None;
        self.is_loading = false;
        self.resolved = true;
        self.absence = Some(Absence::SignedOut);
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Releases the in-flight slot if the owning fetch future is dropped early.
struct Claim<'a, T> {
    state: &'a watch::Sender<StoreState<T>>,
    generation: u64,
    settled: bool,
}

impl<T> Drop for Claim<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            let generation = self.generation;
            self.state.send_if_modified(|state| state.release(generation));
        }
    }
}

/// Process-wide container for one piece of server-derived state.
///
/// The store is the only writer. Everyone else reads through [`Store::state`]
/// or a [`Store::subscribe`] receiver.
pub struct Store<S: Source> {
    name: &'static str,
    source: S,
    state: watch::Sender<StoreState<S::Output>>,
}

impl<S> Store<S>
where
    S: Source,
    S::Output: Clone,
{
    #[must_use]
    pub fn new(name: &'static str, source: S) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { name, source, state }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current snapshot. Never blocks, never fetches.
    #[must_use]
    pub fn state(&self) -> StoreState<S::Output> {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn value(&self) -> Option<S::Output> {
        self.state.borrow().value.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Receiver notified after every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState<S::Output>> {
        self.state.subscribe()
    }

    /// Resolve from the source unless a value is present or a fetch is in flight.
    ///
    /// Returns whether this call issued the remote request. Failures never
    /// escape: they resolve the store to an absent value.
    pub async fn fetch_if_needed(&self, credential: &Credential) -> bool {
        let mut claimed = None;
        self.state.send_if_modified(|state| {
            claimed = state.claim();
            claimed.is_some()
        });
        let Some(generation) = claimed else {
            tracing::trace!(store = self.name, "fetch skipped: resolved or in flight");
            return false;
        };

        let mut claim = Claim { state: &self.state, generation, settled: false };
        tracing::debug!(store = self.name, "resolving");
        let outcome = self.source.fetch(credential).await;
        claim.settled = true;

        match &outcome {
            Ok(Some(_)) => tracing::debug!(store = self.name, "resolved"),
            Ok(None) => tracing::debug!(store = self.name, "resolved absent"),
            Err(e) => tracing::warn!(store = self.name, error = %e, "resolution failed"),
        }

        let applied = self.state.send_if_modified(|state| state.settle(generation, outcome));
        if !applied {
            tracing::debug!(store = self.name, "discarded result resolved after clear");
        }
        true
    }

    /// Drop the value immediately. Idempotent, no network call.
    pub fn clear(&self) {
        self.state.send_modify(StoreState::reset);
        tracing::debug!(store = self.name, "cleared");
    }
}
