//! The lifecycle delegate.
//!
//! A delegate binds exactly one presenter to exactly one host instantiation.
//! The host forwards every lifecycle callback; the delegate validates the
//! ordering against the state machine in [`crate::machine`], keeps the
//! presenter's view binding in sync, and — on terminal teardown — routes the
//! presenter to the registry, to the host's instance-retention channel, or to
//! destruction.
//!
//! A delegate is created fresh for every host instantiation and is not
//! reusable after `on_destroy`. Continuity across instantiations comes from
//! the presenter id written into the saved-state carrier, and from the
//! registry or the retained-instance slot holding the presenter in between.

use std::sync::Arc;

use tracing::{debug, warn};

use holdfast_core::{
    HostInstanceId, Presenter, PresenterExt, PresenterId, RetainedPresenter, SavedState,
};
use holdfast_retain::Savior;

use crate::errors::DelegateError;
use crate::host::{HostSignals, HostSnapshot, RetainedInstanceSlot};
use crate::machine::{self, DelegatePhase, Event, TeardownAction, teardown_action};

/// Saved-state key under which the presenter id is persisted.
pub const SAVED_STATE_PRESENTER_ID: &str = "holdfast.presenter-id";

/// Tracks one presenter across the lifecycle of one host instantiation.
///
/// Construct through [`DelegateBuilder`](crate::builder::DelegateBuilder).
///
/// Known limitation, kept on purpose: when a back-stack teardown registered
/// the presenter and the host is finished without its container ever being
/// restored, no callback reaches this delegate again and the registry entry
/// stays behind. See [`Savior`] for the retention side of that contract.
pub struct LifecycleDelegate<P: Presenter, H: HostSignals> {
    host: H,
    host_instance: HostInstanceId,
    savior: Arc<Savior>,
    retained_slot: Option<Arc<RetainedInstanceSlot<P>>>,
    initial_presenter: Option<Arc<P>>,
    provider: Option<Box<dyn Fn() -> Arc<P> + Send>>,
    presenter: Option<Arc<P>>,
    presenter_id: Option<PresenterId>,
    staged_view: Option<Arc<P::View>>,
    phase: DelegatePhase,
    in_back_stack: bool,
}

impl<P: Presenter, H: HostSignals> std::fmt::Debug for LifecycleDelegate<P, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleDelegate")
            .field("host_instance", &self.host_instance)
            .field("presenter_id", &self.presenter_id)
            .field("phase", &self.phase)
            .field("in_back_stack", &self.in_back_stack)
            .finish_non_exhaustive()
    }
}

impl<P: Presenter, H: HostSignals> LifecycleDelegate<P, H> {
    pub(crate) fn new(
        host: H,
        savior: Arc<Savior>,
        retained_slot: Option<Arc<RetainedInstanceSlot<P>>>,
        initial_presenter: Option<Arc<P>>,
        provider: Option<Box<dyn Fn() -> Arc<P> + Send>>,
        in_back_stack: bool,
    ) -> Self {
        Self {
            host,
            host_instance: HostInstanceId::new(),
            savior,
            retained_slot,
            initial_presenter,
            provider,
            presenter: None,
            presenter_id: None,
            staged_view: None,
            phase: DelegatePhase::Initial,
            in_back_stack,
        }
    }

    // ── host callbacks, in delivery order ───────────────────────────────────

    /// First callback of a host instantiation.
    ///
    /// Resolves the presenter in precedence order — instance-retention slot,
    /// registry entry for the saved id, builder-supplied instance, provider —
    /// and calls `create()` only when the presenter is fresh. A failed
    /// recovery (missing entry, destroyed occupant, type mismatch) silently
    /// falls through to construction.
    pub fn on_create(&mut self, saved: Option<&SavedState>) -> Result<(), DelegateError> {
        let next = self.step(Event::Create)?;
        let saved_id = saved
            .and_then(|state| state.get(SAVED_STATE_PRESENTER_ID))
            .map(PresenterId::from);

        let mut reused = self.take_from_slot();
        if reused.is_none() {
            if let Some(id) = &saved_id {
                reused = self.recover_from_savior(id);
            }
        }

        let presenter = match reused {
            Some(presenter) => presenter,
            None => {
                let presenter = self.fresh_presenter()?;
                presenter.create()?;
                presenter
            }
        };

        let id = saved_id.unwrap_or_default();
        debug!(
            host_instance = %self.host_instance,
            presenter_id = %id,
            "delegate created"
        );
        self.presenter_id = Some(id);
        self.presenter = Some(presenter);
        self.phase = next;
        Ok(())
    }

    /// The host built a (new) view hierarchy.
    ///
    /// Stages the view for the next `on_start`. When this delegate still owns
    /// its presenter from a previous view round — a back-stack entry restored
    /// without the host object dying — any registry entry for the presenter
    /// id is cleared in place, without a recover round-trip.
    pub fn on_view_create(
        &mut self,
        view: Arc<P::View>,
        saved: Option<&SavedState>,
    ) -> Result<(), DelegateError> {
        let next = self.step(Event::ViewCreate)?;
        if self.presenter.is_some() {
            if let Some(id) = &self.presenter_id {
                if self.savior.contains(id) {
                    self.savior.free(id);
                    debug!(
                        presenter_id = %id,
                        "cleared registry entry for a presenter reused in place"
                    );
                }
            }
        }
        debug!(
            host_instance = %self.host_instance,
            restored = saved.is_some(),
            "view staged"
        );
        self.staged_view = Some(view);
        self.phase = next;
        Ok(())
    }

    /// The host became visible; attach the staged view.
    pub fn on_start(&mut self) -> Result<(), DelegateError> {
        let next = self.step(Event::Start)?;
        let view = self
            .staged_view
            .clone()
            .ok_or(DelegateError::MissingView)?;
        self.require_presenter()?.attach_view(view)?;
        self.phase = next;
        Ok(())
    }

    /// The host left the visible state; detach the view.
    pub fn on_stop(&mut self) -> Result<(), DelegateError> {
        let next = self.step(Event::Stop)?;
        self.require_presenter()?.detach_view()?;
        self.phase = next;
        Ok(())
    }

    /// The host dropped its view hierarchy.
    ///
    /// Arriving here with the view still attached means the host skipped
    /// `on_stop`; the delegate detaches defensively instead of failing.
    pub fn on_view_destroy(&mut self) -> Result<(), DelegateError> {
        let next = self.step(Event::ViewDestroy)?;
        let presenter = self.require_presenter()?;
        if presenter.is_view_attached() {
            warn!("view destroyed before stop; detaching");
            presenter.detach_view()?;
        }
        self.staged_view = None;
        self.phase = next;
        Ok(())
    }

    /// The host persists state ahead of a possible teardown.
    ///
    /// Always writes the presenter id. When retention through the registry is
    /// configured, the presenter is registered proactively as well, so a
    /// teardown that never reaches `on_destroy` still leaves the id
    /// recoverable.
    pub fn on_save_state(&mut self, out: &mut SavedState) -> Result<(), DelegateError> {
        let _ = self.step(Event::SaveState)?;
        let id = self.presenter_id.clone().ok_or(DelegateError::NoPresenter)?;
        out.put(SAVED_STATE_PRESENTER_ID, id.as_str());

        let presenter = self.require_presenter()?;
        let config = presenter.core().config();
        if config.retain_presenter && config.use_static_savior && !presenter.is_destroyed() {
            let concrete: Arc<P> = Arc::clone(presenter);
            let erased: Arc<dyn RetainedPresenter> = concrete;
            self.savior.save(id, erased);
        }
        Ok(())
    }

    /// Terminal teardown of the host instantiation.
    ///
    /// Samples the host signals once and routes the presenter by the strict
    /// precedence of [`teardown_action`]. Destruction frees the registry
    /// entry first, then destroys the presenter; the two retention routes
    /// leave the presenter alive for the next host instantiation.
    pub fn on_destroy(&mut self) -> Result<(), DelegateError> {
        let next = self.step(Event::Destroy)?;
        let presenter = Arc::clone(self.require_presenter()?);
        let id = self.presenter_id.clone().ok_or(DelegateError::NoPresenter)?;

        if presenter.is_view_attached() {
            warn!("terminal teardown with the view still attached; detaching");
            presenter.detach_view()?;
        }

        let snapshot = HostSnapshot::capture(&self.host, self.in_back_stack);
        match teardown_action(snapshot, presenter.core().config()) {
            TeardownAction::RetainOnHost => {
                let slot = self
                    .retained_slot
                    .as_ref()
                    .ok_or(DelegateError::RetentionChannelUnavailable)?;
                slot.deposit(Arc::clone(&presenter));
                debug!(
                    host_instance = %self.host_instance,
                    presenter_id = %id,
                    "presenter retained on the instance-retention slot"
                );
            }
            TeardownAction::RetainInSavior => {
                let concrete: Arc<P> = Arc::clone(&presenter);
                let erased: Arc<dyn RetainedPresenter> = concrete;
                self.savior.save(id.clone(), erased);
                debug!(
                    host_instance = %self.host_instance,
                    presenter_id = %id,
                    "presenter retained in the registry"
                );
            }
            TeardownAction::Destroy => {
                self.savior.free(&id);
                presenter.destroy();
                debug!(
                    host_instance = %self.host_instance,
                    presenter_id = %id,
                    "presenter destroyed"
                );
            }
        }

        self.staged_view = None;
        self.phase = next;
        Ok(())
    }

    // ── observers ───────────────────────────────────────────────────────────

    /// The presenter currently bound to this delegate.
    #[must_use]
    pub fn presenter(&self) -> Option<&Arc<P>> {
        self.presenter.as_ref()
    }

    /// The id under which the presenter is (or would be) retained.
    #[must_use]
    pub fn presenter_id(&self) -> Option<&PresenterId> {
        self.presenter_id.as_ref()
    }

    /// Current delegate phase.
    #[must_use]
    pub fn phase(&self) -> DelegatePhase {
        self.phase
    }

    /// Whether the delegate currently considers its container part of a back
    /// stack.
    #[must_use]
    pub fn is_in_back_stack(&self) -> bool {
        self.in_back_stack
    }

    /// Record that the container was pushed onto (or left) a back stack.
    ///
    /// Sampled into the host snapshot at teardown time; flipping it after
    /// `on_destroy` has no effect.
    pub fn set_in_back_stack(&mut self, in_back_stack: bool) {
        self.in_back_stack = in_back_stack;
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn step(&self, event: Event) -> Result<DelegatePhase, DelegateError> {
        machine::advance(self.phase, event).map_err(|invalid| DelegateError::UnexpectedCallback {
            callback: invalid.event.callback_name(),
            phase: invalid.phase,
        })
    }

    fn require_presenter(&self) -> Result<&Arc<P>, DelegateError> {
        self.presenter.as_ref().ok_or(DelegateError::NoPresenter)
    }

    fn take_from_slot(&self) -> Option<Arc<P>> {
        let presenter = self.retained_slot.as_ref()?.take()?;
        if presenter.is_destroyed() {
            warn!("instance-retention slot held a destroyed presenter; discarding");
            return None;
        }
        debug!(
            host_instance = %self.host_instance,
            "presenter reused from the instance-retention slot"
        );
        Some(presenter)
    }

    fn recover_from_savior(&self, id: &PresenterId) -> Option<Arc<P>> {
        let entry = self.savior.recover(id)?;
        match entry.into_any().downcast::<P>() {
            Ok(presenter) => {
                if presenter.is_destroyed() {
                    warn!(
                        presenter_id = %id,
                        "recovered presenter was already destroyed; constructing a new one"
                    );
                    return None;
                }
                debug!(
                    host_instance = %self.host_instance,
                    presenter_id = %id,
                    "presenter recovered from the registry"
                );
                Some(presenter)
            }
            Err(_) => {
                warn!(
                    presenter_id = %id,
                    "retained presenter has a different concrete type; constructing a new one"
                );
                None
            }
        }
    }

    fn fresh_presenter(&mut self) -> Result<Arc<P>, DelegateError> {
        if let Some(presenter) = self.initial_presenter.take() {
            return Ok(presenter);
        }
        match &self.provider {
            Some(make) => Ok(make()),
            None => Err(DelegateError::BuilderIncomplete("a presenter source")),
        }
    }
}
