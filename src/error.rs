//! Typed errors for the handful of preconditions this crate chooses to
//! reject outright, rather than leave as undefined-behaviour-per-caller-
//! contract (see §7 of `SPEC_FULL.md`).

use thiserror::Error;

/// Errors surfaced by [`crate::Dispatcher`] construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatcherError {
    /// `start_up` was called with zero cores; a scheduler with no core slots
    /// is a misconfiguration, not a deep invariant, so it is rejected here
    /// rather than left as an unchecked caller contract.
    #[error("dispatcher requires at least one core, got 0")]
    NoCores,
}
