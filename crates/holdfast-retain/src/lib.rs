//! # holdfast-retain
//!
//! The static registry (the "savior"): a process-wide keyed store that keeps
//! presenters alive while the host object that registered them is destroyed.
//!
//! - **Savior**: mutex-guarded id → presenter map with `save` / `recover` /
//!   `free` / `presenter_count`
//! - **Ownership**: `recover` removes the entry and hands the presenter to
//!   the caller; entries are never destroyed by the registry itself
//! - **Injection**: use [`Savior::shared`] for the process-wide instance, or
//!   construct private instances for tests and isolated hosts

#![deny(unsafe_code)]

pub mod savior;

pub use savior::Savior;
