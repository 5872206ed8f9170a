//! # holdfast-settings
//!
//! Configuration management with layered sources for Holdfast.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`HoldfastSettings::default()`]
//! 2. **User file** — `~/.holdfast/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `HOLDFAST_*` overrides (highest priority)
//!
//! [`RetentionSettings::to_config`] produces the
//! [`PresenterConfig`](holdfast_core::PresenterConfig) handed to presenters.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{HoldfastSettings, LoggingSettings, RetentionSettings};

use std::sync::OnceLock;

/// Global settings singleton, initialized on first access.
static SETTINGS: OnceLock<HoldfastSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.holdfast/settings.json` with env
/// var overrides; on failure, falls back to compiled defaults. Subsequent
/// calls return the cached value.
pub fn get_settings() -> &'static HoldfastSettings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}

/// Initialize the global settings with a specific value.
///
/// # Errors
///
/// Returns the provided settings back if the global was already initialized.
pub fn init_settings(settings: HoldfastSettings) -> std::result::Result<(), HoldfastSettings> {
    SETTINGS.set(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
