//! Delegate error types.
//!
//! Every variant marks an integration bug in the host wiring, never an
//! ambiguous platform signal: contradictory teardown flags are resolved by
//! precedence inside the state machine and do not surface here.

use thiserror::Error;

use holdfast_core::PresenterError;

use crate::machine::DelegatePhase;

/// Errors from driving a lifecycle delegate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DelegateError {
    /// The presenter rejected a lifecycle operation.
    #[error("{0}")]
    Presenter(#[from] PresenterError),

    /// A host callback arrived out of order.
    #[error("{callback} is not allowed while the delegate is {phase:?}")]
    UnexpectedCallback {
        /// The callback that was delivered.
        callback: &'static str,
        /// The delegate phase at delivery time.
        phase: DelegatePhase,
    },

    /// `on_start` was delivered before `on_view_create` staged a view.
    #[error("no view was staged before start")]
    MissingView,

    /// The delegate lost its presenter binding; indicates corrupted wiring.
    #[error("no presenter is bound to this delegate")]
    NoPresenter,

    /// Retention chose the host instance channel, but the builder never wired
    /// a [`RetainedInstanceSlot`](crate::host::RetainedInstanceSlot).
    #[error("instance retention requested but no retained-instance slot is wired")]
    RetentionChannelUnavailable,

    /// `build()` was called with a mandatory collaborator missing.
    #[error("delegate builder is missing {0}")]
    BuilderIncomplete(&'static str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
