//! The presenter capability trait and its lifecycle core.
//!
//! Concrete presenters do not inherit from a base class; they implement
//! [`Presenter`] and compose a [`PresenterCore`] that owns the configuration
//! and the phase machine. All state transitions are driven through the
//! blanket [`PresenterExt`] so every implementor shares one transition
//! function, and misuse surfaces as [`PresenterError`] instead of corrupting
//! the phase.
//!
//! The destroyed flag is monotonic: once a presenter reaches
//! [`LifecyclePhase::Destroyed`] it never leaves it, and a second `destroy()`
//! is a silent no-op.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::PresenterConfig;
use crate::errors::PresenterError;

/// Lifecycle phase of a presenter.
///
/// `ViewAttached` and `ViewDetached` may alternate arbitrarily often before
/// the terminal `Destroyed` phase is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Constructed, `create()` not yet called.
    Initial,
    /// `create()` ran; no view attached yet.
    Created,
    /// A view is currently attached.
    ViewAttached,
    /// The view was detached; the presenter may be re-attached or destroyed.
    ViewDetached,
    /// Terminal. Absorbing: no transition leaves this phase.
    Destroyed,
}

/// State every presenter composes: configuration plus the guarded phase
/// machine and the currently attached view.
pub struct PresenterCore<V: ?Sized> {
    config: PresenterConfig,
    state: Mutex<CoreState<V>>,
}

struct CoreState<V: ?Sized> {
    phase: LifecyclePhase,
    view: Option<Arc<V>>,
}

impl<V: ?Sized + Send + Sync> PresenterCore<V> {
    /// Create a core in the `Initial` phase.
    #[must_use]
    pub fn new(config: PresenterConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CoreState {
                phase: LifecyclePhase::Initial,
                view: None,
            }),
        }
    }

    /// The retention configuration this presenter was constructed with.
    #[must_use]
    pub fn config(&self) -> PresenterConfig {
        self.config
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.state.lock().phase
    }

    /// The currently attached view, if any.
    #[must_use]
    pub fn view(&self) -> Option<Arc<V>> {
        self.state.lock().view.clone()
    }
}

impl<V: ?Sized + Send + Sync> Default for PresenterCore<V> {
    fn default() -> Self {
        Self::new(PresenterConfig::default())
    }
}

/// Capability trait for presenters.
///
/// Implementors provide access to their composed [`PresenterCore`] and may
/// override any of the lifecycle hooks; the hooks default to no-ops. The
/// driving operations (`create`, `attach_view`, …) come from the blanket
/// [`PresenterExt`] and must not be re-implemented.
pub trait Presenter: Send + Sync + 'static {
    /// The view type this presenter binds to.
    type View: ?Sized + Send + Sync + 'static;

    /// The lifecycle core composed by this presenter.
    fn core(&self) -> &PresenterCore<Self::View>;

    /// Called once, after the transition into `Created`.
    fn on_create(&self) {}

    /// Called after a view was attached. The view is reachable through
    /// [`PresenterCore::view`].
    fn on_view_attached(&self) {}

    /// Called before the view reference is dropped; the view is still
    /// reachable through [`PresenterCore::view`] while this hook runs.
    fn on_view_detached(&self) {}

    /// Called once, after the transition into the terminal `Destroyed` phase.
    fn on_destroy(&self) {}
}

/// Type-erased handle the registry stores.
///
/// Blanket-implemented for every [`Presenter`], so any `Arc<P>` coerces to
/// `Arc<dyn RetainedPresenter>`. Recovery downcasts back to the concrete
/// type; a mismatch is treated as a registry miss, never an error.
pub trait RetainedPresenter: Any + Send + Sync {
    /// Whether the presenter reached its terminal phase.
    fn is_destroyed(&self) -> bool;

    /// Upcast for downcasting back to the concrete presenter type.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<P: Presenter> RetainedPresenter for P {
    fn is_destroyed(&self) -> bool {
        self.core().phase() == LifecyclePhase::Destroyed
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Lifecycle-driving operations, blanket-implemented for every presenter.
///
/// Hooks run outside the internal lock, in a stable order relative to the
/// phase transition: `on_create`/`on_view_attached`/`on_destroy` after their
/// transition, `on_view_detached` before the view reference is dropped.
pub trait PresenterExt: Presenter {
    /// Move from `Initial` to `Created` and run [`Presenter::on_create`].
    ///
    /// Calling `create()` on an already created presenter logs a warning and
    /// is otherwise ignored.
    fn create(&self) -> Result<(), PresenterError> {
        {
            let mut state = self.core().state.lock();
            match state.phase {
                LifecyclePhase::Initial => state.phase = LifecyclePhase::Created,
                LifecyclePhase::Destroyed => return Err(PresenterError::Destroyed),
                LifecyclePhase::Created
                | LifecyclePhase::ViewAttached
                | LifecyclePhase::ViewDetached => {
                    warn!("create() called on an already created presenter, ignoring");
                    return Ok(());
                }
            }
        }
        self.on_create();
        Ok(())
    }

    /// Attach a view and run [`Presenter::on_view_attached`].
    ///
    /// Re-attaching the identical view is ignored; attaching a different view
    /// while one is attached, or attaching to a destroyed or never-created
    /// presenter, is misuse.
    fn attach_view(&self, view: Arc<Self::View>) -> Result<(), PresenterError> {
        {
            let mut state = self.core().state.lock();
            match state.phase {
                LifecyclePhase::Destroyed => return Err(PresenterError::Destroyed),
                LifecyclePhase::Initial => return Err(PresenterError::NotCreated),
                LifecyclePhase::ViewAttached => {
                    if state.view.as_ref().is_some_and(|v| Arc::ptr_eq(v, &view)) {
                        warn!("view is already attached, ignoring");
                        return Ok(());
                    }
                    return Err(PresenterError::ViewAlreadyAttached);
                }
                LifecyclePhase::Created | LifecyclePhase::ViewDetached => {
                    state.view = Some(view);
                    state.phase = LifecyclePhase::ViewAttached;
                }
            }
        }
        self.on_view_attached();
        Ok(())
    }

    /// Run [`Presenter::on_view_detached`], then drop the view reference and
    /// move to `ViewDetached`.
    fn detach_view(&self) -> Result<(), PresenterError> {
        {
            let state = self.core().state.lock();
            match state.phase {
                LifecyclePhase::ViewAttached => {}
                LifecyclePhase::Destroyed => return Err(PresenterError::Destroyed),
                LifecyclePhase::Initial
                | LifecyclePhase::Created
                | LifecyclePhase::ViewDetached => {
                    return Err(PresenterError::NoViewAttached);
                }
            }
        }
        self.on_view_detached();
        let mut state = self.core().state.lock();
        state.view = None;
        state.phase = LifecyclePhase::ViewDetached;
        Ok(())
    }

    /// Move to the terminal `Destroyed` phase and run
    /// [`Presenter::on_destroy`]. Idempotent: a second call is a no-op.
    ///
    /// A presenter destroyed with its view still attached gets the detach
    /// hook first; the host contract delivers the detach callbacks before
    /// terminal teardown, so hitting that path logs a warning.
    fn destroy(&self) {
        let view_still_attached = {
            let state = self.core().state.lock();
            match state.phase {
                LifecyclePhase::Destroyed => {
                    debug!("destroy() called on an already destroyed presenter, ignoring");
                    return;
                }
                LifecyclePhase::ViewAttached => true,
                LifecyclePhase::Initial
                | LifecyclePhase::Created
                | LifecyclePhase::ViewDetached => false,
            }
        };
        if view_still_attached {
            warn!("destroying a presenter whose view is still attached");
            self.on_view_detached();
            self.core().state.lock().view = None;
        }
        self.core().state.lock().phase = LifecyclePhase::Destroyed;
        self.on_destroy();
    }

    /// Whether a view is currently attached.
    fn is_view_attached(&self) -> bool {
        self.core().phase() == LifecyclePhase::ViewAttached
    }
}

impl<P: Presenter + ?Sized> PresenterExt for P {}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;

    use super::*;

    struct NoopView;

    #[derive(Default)]
    struct Hooks {
        created: AtomicUsize,
        attached: AtomicUsize,
        detached: AtomicUsize,
        destroyed: AtomicUsize,
    }

    struct TestPresenter {
        core: PresenterCore<NoopView>,
        hooks: Hooks,
    }

    impl TestPresenter {
        fn new() -> Self {
            Self {
                core: PresenterCore::new(PresenterConfig::default()),
                hooks: Hooks::default(),
            }
        }
    }

    impl Presenter for TestPresenter {
        type View = NoopView;

        fn core(&self) -> &PresenterCore<NoopView> {
            &self.core
        }

        fn on_create(&self) {
            let _ = self.hooks.created.fetch_add(1, Ordering::SeqCst);
        }

        fn on_view_attached(&self) {
            let _ = self.hooks.attached.fetch_add(1, Ordering::SeqCst);
        }

        fn on_view_detached(&self) {
            // the view must still be reachable while this hook runs
            assert!(self.core.view().is_some());
            let _ = self.hooks.detached.fetch_add(1, Ordering::SeqCst);
        }

        fn on_destroy(&self) {
            let _ = self.hooks.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    // --- happy path ---

    #[test]
    fn full_lifecycle_runs_hooks_once() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        presenter.attach_view(Arc::new(NoopView)).unwrap();
        presenter.detach_view().unwrap();
        presenter.destroy();

        assert_eq!(presenter.hooks.created.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.hooks.attached.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.hooks.detached.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.hooks.destroyed.load(Ordering::SeqCst), 1);
        assert!(presenter.is_destroyed());
    }

    #[test]
    fn attach_detach_cycles() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        for _ in 0..3 {
            presenter.attach_view(Arc::new(NoopView)).unwrap();
            assert!(presenter.is_view_attached());
            presenter.detach_view().unwrap();
            assert!(!presenter.is_view_attached());
        }
        assert_eq!(presenter.hooks.attached.load(Ordering::SeqCst), 3);
        assert_eq!(presenter.hooks.detached.load(Ordering::SeqCst), 3);
    }

    // --- tolerated repeats ---

    #[test]
    fn double_create_is_ignored() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        presenter.create().unwrap();
        assert_eq!(presenter.hooks.created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn double_destroy_is_a_noop() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        presenter.destroy();
        presenter.destroy();
        assert!(presenter.is_destroyed());
        assert_eq!(presenter.hooks.destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reattaching_the_same_view_is_ignored() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        let view = Arc::new(NoopView);
        presenter.attach_view(Arc::clone(&view)).unwrap();
        presenter.attach_view(view).unwrap();
        assert_eq!(presenter.hooks.attached.load(Ordering::SeqCst), 1);
    }

    // --- misuse ---

    #[test]
    fn attach_after_destroy_is_misuse() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        presenter.destroy();
        assert_matches!(
            presenter.attach_view(Arc::new(NoopView)),
            Err(PresenterError::Destroyed)
        );
    }

    #[test]
    fn attach_before_create_is_misuse() {
        let presenter = TestPresenter::new();
        assert_matches!(
            presenter.attach_view(Arc::new(NoopView)),
            Err(PresenterError::NotCreated)
        );
    }

    #[test]
    fn attach_a_second_view_is_misuse() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        presenter.attach_view(Arc::new(NoopView)).unwrap();
        assert_matches!(
            presenter.attach_view(Arc::new(NoopView)),
            Err(PresenterError::ViewAlreadyAttached)
        );
    }

    #[test]
    fn detach_without_attach_is_misuse() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        assert_matches!(
            presenter.detach_view(),
            Err(PresenterError::NoViewAttached)
        );
    }

    #[test]
    fn create_after_destroy_is_misuse() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        presenter.destroy();
        assert_matches!(presenter.create(), Err(PresenterError::Destroyed));
    }

    // --- defensive destroy ---

    #[test]
    fn destroy_with_attached_view_detaches_first() {
        let presenter = TestPresenter::new();
        presenter.create().unwrap();
        presenter.attach_view(Arc::new(NoopView)).unwrap();
        presenter.destroy();
        assert!(presenter.is_destroyed());
        assert_eq!(presenter.hooks.detached.load(Ordering::SeqCst), 1);
        assert!(presenter.core.view().is_none());
    }

    // --- type erasure ---

    #[test]
    fn retained_presenter_round_trips_through_any() {
        let presenter: Arc<TestPresenter> = Arc::new(TestPresenter::new());
        let erased: Arc<dyn RetainedPresenter> = Arc::clone(&presenter) as Arc<dyn RetainedPresenter>;
        assert!(!erased.is_destroyed());
        let back = erased.into_any().downcast::<TestPresenter>().unwrap();
        assert!(Arc::ptr_eq(&back, &presenter));
    }
}
