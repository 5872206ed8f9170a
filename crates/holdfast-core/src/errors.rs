//! Presenter error types.
//!
//! Every variant marks a caller-integration bug: the lifecycle contract was
//! violated (e.g. attaching a view to a destroyed presenter). Tolerated
//! repeats — double `destroy()`, re-attaching the identical view — are silent
//! no-ops and never reach these errors.

use thiserror::Error;

/// Errors from driving a presenter's lifecycle out of order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresenterError {
    /// An operation was invoked on a presenter that already reached its
    /// terminal state.
    #[error("presenter is already destroyed")]
    Destroyed,

    /// A view operation was invoked before `create()`.
    #[error("presenter was never created")]
    NotCreated,

    /// `attach_view` was called while a different view is attached.
    #[error("a different view is already attached")]
    ViewAlreadyAttached,

    /// `detach_view` was called without an attached view.
    #[error("no view is attached")]
    NoViewAttached,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
