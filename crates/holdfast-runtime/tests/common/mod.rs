//! Shared fixtures for delegate tests: a scriptable host double and a
//! minimal presenter.

use std::sync::Arc;

use parking_lot::Mutex;

use holdfast_core::{Presenter, PresenterConfig, PresenterCore};
use holdfast_runtime::HostSignals;

/// View placeholder; the delegate only needs an attachable object.
pub struct NoopView;

/// Presenter with no behavior beyond the lifecycle core.
pub struct TestPresenter {
    core: PresenterCore<NoopView>,
}

impl TestPresenter {
    pub fn with_config(config: PresenterConfig) -> Arc<Self> {
        Arc::new(Self {
            core: PresenterCore::new(config),
        })
    }
}

impl Presenter for TestPresenter {
    type View = NoopView;

    fn core(&self) -> &PresenterCore<NoopView> {
        &self.core
    }
}

#[derive(Default)]
struct HostFlags {
    changing_configuration: bool,
    finishing: bool,
}

/// Host double whose teardown flags the test script flips at will.
#[derive(Clone, Default)]
pub struct TestHost {
    flags: Arc<Mutex<HostFlags>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_changing_configuration(&self, changing: bool) {
        self.flags.lock().changing_configuration = changing;
    }

    pub fn set_finishing(&self, finishing: bool) {
        self.flags.lock().finishing = finishing;
    }
}

impl HostSignals for TestHost {
    fn is_changing_configuration(&self) -> bool {
        self.flags.lock().changing_configuration
    }

    fn is_finishing(&self) -> bool {
        self.flags.lock().finishing
    }
}

/// Shorthand for the two retention flags.
pub fn config(retain: bool, use_savior: bool) -> PresenterConfig {
    PresenterConfig::new()
        .with_retain_presenter(retain)
        .with_static_savior(use_savior)
}
