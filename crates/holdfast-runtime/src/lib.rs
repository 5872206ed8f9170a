//! # holdfast-runtime
//!
//! The lifecycle delegate: the state machine that keeps a presenter alive —
//! or destroys it — across the destruction of its hosting UI container.
//!
//! - **Delegate**: intercepts every host lifecycle callback, validates the
//!   ordering, and binds one presenter to one host instantiation
//! - **Machine**: pure transition and teardown-classification functions,
//!   evaluated in strict precedence over the ambiguous host signals
//! - **Host abstraction**: the two-method [`HostSignals`] capability plus
//!   [`RetainedInstanceSlot`], the modeled instance-retention channel
//! - **Builder**: wires host, registry, slot, and presenter source

#![deny(unsafe_code)]

pub mod builder;
pub mod delegate;
pub mod errors;
pub mod host;
pub mod machine;

pub use builder::DelegateBuilder;
pub use delegate::{LifecycleDelegate, SAVED_STATE_PRESENTER_ID};
pub use errors::DelegateError;
pub use host::{HostSignals, HostSnapshot, RetainedInstanceSlot};
pub use machine::{DelegatePhase, TeardownAction, teardown_action};
