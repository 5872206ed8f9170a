//! # holdfast-core
//!
//! Foundation types for the Holdfast presenter-retention library.
//!
//! This crate provides the shared vocabulary the other Holdfast crates depend
//! on:
//!
//! - **Presenter**: the capability trait concrete presenters implement, plus
//!   [`PresenterCore`], the lifecycle state holder they compose
//! - **Branded IDs**: [`PresenterId`] and [`HostInstanceId`] as newtypes
//! - **Configuration**: [`PresenterConfig`] with the two retention flags
//! - **Saved state**: [`SavedState`], the string-keyed carrier handed across
//!   host recreation
//! - **Errors**: [`PresenterError`] via `thiserror`

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod ids;
pub mod presenter;
pub mod saved_state;

pub use config::PresenterConfig;
pub use errors::PresenterError;
pub use ids::{HostInstanceId, PresenterId};
pub use presenter::{
    LifecyclePhase, Presenter, PresenterCore, PresenterExt, RetainedPresenter,
};
pub use saved_state::SavedState;
