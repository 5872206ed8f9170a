//! The delegate's state machine, as pure functions.
//!
//! Two decision tables live here, kept free of side effects so they can be
//! tested exhaustively:
//!
//! - [`advance`]: validates callback ordering over [`DelegatePhase`] and
//!   [`Event`], rejecting out-of-order callbacks
//! - [`teardown_action`]: classifies a terminal teardown into retain-on-host,
//!   retain-in-registry, or destroy, by strict precedence over the host
//!   signal snapshot

use holdfast_core::PresenterConfig;

use crate::host::HostSnapshot;

/// Phase of a lifecycle delegate.
///
/// Mirrors the hosted presenter's observable lifecycle; `Destroyed` is
/// terminal and absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegatePhase {
    /// Constructed; `on_create` not yet delivered.
    Initial,
    /// `on_create` ran; no view attached.
    Created,
    /// `on_start` ran; the view is attached.
    ViewAttached,
    /// `on_stop` (or a defensive view teardown) ran; the view is detached.
    ViewDetached,
    /// `on_destroy` ran. Terminal.
    Destroyed,
}

/// One host callback, as seen by the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Create,
    ViewCreate,
    Start,
    Stop,
    ViewDestroy,
    SaveState,
    Destroy,
}

impl Event {
    /// The public callback name, for error reporting.
    pub(crate) fn callback_name(self) -> &'static str {
        match self {
            Event::Create => "on_create",
            Event::ViewCreate => "on_view_create",
            Event::Start => "on_start",
            Event::Stop => "on_stop",
            Event::ViewDestroy => "on_view_destroy",
            Event::SaveState => "on_save_state",
            Event::Destroy => "on_destroy",
        }
    }
}

/// A callback arrived in a phase where it is not permitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InvalidTransition {
    pub(crate) event: Event,
    pub(crate) phase: DelegatePhase,
}

/// Compute the phase after `event`, or reject the callback.
///
/// `SaveState` is phase-neutral. `ViewDestroy` is accepted from
/// `ViewAttached` as well, because some hosts tear the view down without a
/// preceding stop; the delegate detaches defensively in that case.
pub(crate) fn advance(
    phase: DelegatePhase,
    event: Event,
) -> Result<DelegatePhase, InvalidTransition> {
    use DelegatePhase as P;

    let next = match (phase, event) {
        (P::Initial, Event::Create) => P::Created,
        (P::Created | P::ViewDetached, Event::ViewCreate) => phase,
        (P::Created | P::ViewDetached, Event::Start) => P::ViewAttached,
        (P::ViewAttached, Event::Stop) => P::ViewDetached,
        (P::ViewAttached | P::ViewDetached, Event::ViewDestroy) => P::ViewDetached,
        (P::Created | P::ViewAttached | P::ViewDetached, Event::SaveState) => phase,
        (P::Created | P::ViewAttached | P::ViewDetached, Event::Destroy) => P::Destroyed,
        _ => return Err(InvalidTransition { event, phase }),
    };
    Ok(next)
}

/// What to do with the presenter when the host reaches terminal teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeardownAction {
    /// Keep the presenter alive through the host's instance-retention
    /// channel.
    RetainOnHost,
    /// Keep the presenter alive in the static registry.
    RetainInSavior,
    /// Free any registry entry, then destroy the presenter.
    Destroy,
}

/// Classify a terminal teardown.
///
/// The host flags are not guaranteed to be mutually consistent, so the rules
/// are evaluated in strict precedence order and never fail:
///
/// 1. A configuration change retains the presenter when `retain_presenter`
///    is set — through the registry if `use_static_savior`, otherwise through
///    the host channel. With retention disabled the presenter is destroyed
///    like on any other teardown.
/// 2. A host going onto the back stack (and not finishing) retains through
///    the registry unconditionally: the container object dies but is
///    logically still alive, so `retain_presenter` is ignored.
/// 3. Everything else is a permanent removal: destroy.
///
/// In particular, `finishing` combined with `changing_configuration` resolves
/// to rule 1, and `finishing` combined with `in_back_stack` resolves to
/// rule 3.
#[must_use]
pub fn teardown_action(snapshot: HostSnapshot, config: PresenterConfig) -> TeardownAction {
    if snapshot.changing_configuration {
        if !config.retain_presenter {
            return TeardownAction::Destroy;
        }
        if config.use_static_savior {
            return TeardownAction::RetainInSavior;
        }
        return TeardownAction::RetainOnHost;
    }
    if snapshot.in_back_stack && !snapshot.finishing {
        return TeardownAction::RetainInSavior;
    }
    TeardownAction::Destroy
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
