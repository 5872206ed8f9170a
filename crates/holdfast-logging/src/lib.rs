//! # holdfast-logging
//!
//! Process-wide pluggable logging for Holdfast.
//!
//! - **Facade**: one global slot holding the backing [`LogSink`];
//!   [`install`] rejects the facade's own handle (recursive registration)
//!   at configuration time instead of recursing on the first record
//! - **Bridge**: [`FacadeLayer`] forwards `tracing` events into the facade,
//!   so library code keeps using plain `tracing` macros
//! - **Sinks**: bring your own, or use [`MemorySink`] in tests

#![deny(unsafe_code)]

pub mod facade;
pub mod layer;
pub mod types;

pub use facade::{Facade, LogError, LogSink, MemorySink, install, uninstall};
pub use layer::{FacadeLayer, init_tracing};
pub use types::{LogLevel, LogRecord};
