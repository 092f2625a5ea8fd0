//! Once-only processing of a model's declared behavior list.
//!
//! Multiple callers may race to touch a model for the first time.  `InitCell`
//! wraps a [`OnceLock`] so the declaration work runs exactly once: the winner
//! executes it, every loser blocks until it finishes and then observes the
//! recorded outcome — never a partially-populated table, never a second run.
//!
//! The recorded outcome includes failure: if a declared entry cannot be bound
//! (unresolvable name, malformed configuration), the first error is stored in
//! the cell and replayed to every later caller.
//!
//! # Re-entrancy
//!
//! The closure passed to [`InitCell::run_once`] must not call back into
//! `run_once` on the same cell — `OnceLock` would deadlock.  `ModelType`
//! upholds this by running declaration-driven binds through its internal
//! bind path, which skips initialization.

use std::sync::OnceLock;

use acts_core::{ActsError, ActsResult};

/// The per-model initialization flag plus the recorded outcome of the
/// declaration run.
#[derive(Default)]
pub(crate) struct InitCell {
    outcome: OnceLock<Option<ActsError>>,
}

impl InitCell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `work` exactly once across all threads; replay its outcome to
    /// every caller, including the ones that raced and lost.
    pub(crate) fn run_once(&self, work: impl FnOnce() -> ActsResult<()>) -> ActsResult<()> {
        match self.outcome.get_or_init(|| work().err()) {
            None => Ok(()),
            Some(err) => Err(err.clone()),
        }
    }

    /// Whether the declaration run has completed (successfully or not).
    pub(crate) fn is_set(&self) -> bool {
        self.outcome.get().is_some()
    }
}
