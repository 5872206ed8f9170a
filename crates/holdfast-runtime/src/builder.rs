//! Delegate construction.
//!
//! The builder wires a delegate to its collaborators: the host capability
//! surface, the registry, the optional instance-retention slot, and a
//! presenter source. Supplying a concrete presenter instance and supplying a
//! provider closure are both supported; the instance wins when both are set,
//! and the closure covers recovery misses on later instantiations.

use std::sync::Arc;

use holdfast_core::Presenter;
use holdfast_retain::Savior;

use crate::delegate::LifecycleDelegate;
use crate::errors::DelegateError;
use crate::host::{HostSignals, RetainedInstanceSlot};

/// Builder for [`LifecycleDelegate`].
///
/// Mandatory: a host and at least one presenter source. The registry defaults
/// to the process-wide [`Savior::shared`] instance; tests typically inject a
/// private one.
pub struct DelegateBuilder<P: Presenter, H: HostSignals> {
    host: Option<H>,
    savior: Option<Arc<Savior>>,
    retained_slot: Option<Arc<RetainedInstanceSlot<P>>>,
    presenter: Option<Arc<P>>,
    provider: Option<Box<dyn Fn() -> Arc<P> + Send>>,
    in_back_stack: bool,
}

impl<P: Presenter, H: HostSignals> DelegateBuilder<P, H> {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: None,
            savior: None,
            retained_slot: None,
            presenter: None,
            provider: None,
            in_back_stack: false,
        }
    }

    /// The host this delegate samples teardown signals from. Mandatory.
    #[must_use]
    pub fn host(mut self, host: H) -> Self {
        self.host = Some(host);
        self
    }

    /// Use a specific registry instead of the process-wide one.
    #[must_use]
    pub fn savior(mut self, savior: Arc<Savior>) -> Self {
        self.savior = Some(savior);
        self
    }

    /// Wire the host's instance-retention channel.
    ///
    /// Required whenever retention may run with the registry channel
    /// disabled; teardown fails otherwise.
    #[must_use]
    pub fn retained_slot(mut self, slot: Arc<RetainedInstanceSlot<P>>) -> Self {
        self.retained_slot = Some(slot);
        self
    }

    /// Presenter instance to use when no retained presenter is recovered.
    #[must_use]
    pub fn presenter(mut self, presenter: Arc<P>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Fallback presenter constructor.
    #[must_use]
    pub fn presenter_provider(mut self, provider: impl Fn() -> Arc<P> + Send + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Initial back-stack flag; also settable later through
    /// [`LifecycleDelegate::set_in_back_stack`].
    #[must_use]
    pub fn in_back_stack(mut self, in_back_stack: bool) -> Self {
        self.in_back_stack = in_back_stack;
        self
    }

    /// Build the delegate.
    pub fn build(self) -> Result<LifecycleDelegate<P, H>, DelegateError> {
        let host = self.host.ok_or(DelegateError::BuilderIncomplete("a host"))?;
        if self.presenter.is_none() && self.provider.is_none() {
            return Err(DelegateError::BuilderIncomplete("a presenter source"));
        }
        let savior = self.savior.unwrap_or_else(Savior::shared);
        Ok(LifecycleDelegate::new(
            host,
            savior,
            self.retained_slot,
            self.presenter,
            self.provider,
            self.in_back_stack,
        ))
    }
}

impl<P: Presenter, H: HostSignals> Default for DelegateBuilder<P, H> {
    fn default() -> Self {
        Self::new()
    }
}
