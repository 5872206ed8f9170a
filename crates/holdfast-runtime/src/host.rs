//! Host capability abstraction.
//!
//! The delegate never sees the concrete host type; it depends on
//! [`HostSignals`], the two booleans the platform can answer at teardown
//! time, plus its own back-stack knowledge. [`RetainedInstanceSlot`] models
//! the host's instance-retention channel as a one-slot cell the harness or
//! the real host integration owns.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

/// The capability set the delegate reads from its host.
///
/// Implementations answer with the platform's current view of the teardown in
/// progress; the answers are sampled fresh at every callback and are not
/// required to be mutually consistent.
pub trait HostSignals {
    /// Whether the host is being destroyed for an immediate recreation.
    fn is_changing_configuration(&self) -> bool;

    /// Whether the host is being permanently removed.
    fn is_finishing(&self) -> bool;
}

/// Host flags sampled at one callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostSnapshot {
    /// The host reports a configuration change in progress.
    pub changing_configuration: bool,
    /// The host reports it is finishing.
    pub finishing: bool,
    /// The delegate knows its container went onto a back stack.
    pub in_back_stack: bool,
}

impl HostSnapshot {
    /// Sample `host` and combine with the delegate's back-stack flag.
    #[must_use]
    pub fn capture<H: HostSignals>(host: &H, in_back_stack: bool) -> Self {
        Self {
            changing_configuration: host.is_changing_configuration(),
            finishing: host.is_finishing(),
            in_back_stack,
        }
    }
}

/// One-slot cell modeling the host's instance-retention channel.
///
/// On a configuration change with the registry channel disabled, the outgoing
/// delegate deposits its presenter here; the host integration hands the same
/// slot to the recreated delegate, which takes the presenter back out. The
/// slot holds at most one presenter.
pub struct RetainedInstanceSlot<P> {
    slot: Mutex<Option<Arc<P>>>,
}

impl<P> RetainedInstanceSlot<P> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Store `presenter`, replacing any occupant.
    pub fn deposit(&self, presenter: Arc<P>) {
        if self.slot.lock().replace(presenter).is_some() {
            warn!("instance-retention slot was still occupied; replacing");
        }
    }

    /// Remove and return the occupant, if any.
    #[must_use]
    pub fn take(&self) -> Option<Arc<P>> {
        self.slot.lock().take()
    }

    /// Whether a presenter is currently deposited.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl<P> Default for RetainedInstanceSlot<P> {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
