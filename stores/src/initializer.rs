//! Fire-once bootstrap triggers.
//!
//! A store initializer hands out exactly one "go" per application lifetime,
//! no matter how many call sites ask. It never reads store state; retries go
//! through `Store::fetch_if_needed` directly.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct Initializer {
    fired: AtomicBool,
}

impl Initializer {
    #[must_use]
    pub const fn new() -> Self {
        Self { fired: AtomicBool::new(false) }
    }

    /// Returns `true` for the first caller only.
    pub fn trigger(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}
