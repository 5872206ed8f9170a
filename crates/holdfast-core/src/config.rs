//! Presenter retention configuration.

use serde::{Deserialize, Serialize};

/// The two flags that steer the retain-vs-destroy decision on teardown.
///
/// Both default to `true`: presenters survive configuration changes and use
/// the static registry as the retention channel. The flags only influence the
/// configuration-change path; back-stack retention is unconditional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresenterConfig {
    /// Keep the presenter alive across a configuration change.
    pub retain_presenter: bool,
    /// Retain through the static registry instead of the host's own
    /// instance-retention channel.
    pub use_static_savior: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            retain_presenter: true,
            use_static_savior: true,
        }
    }
}

impl PresenterConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the presenter survives configuration changes.
    #[must_use]
    pub fn with_retain_presenter(mut self, retain: bool) -> Self {
        self.retain_presenter = retain;
        self
    }

    /// Set whether the static registry is used as the retention channel.
    #[must_use]
    pub fn with_static_savior(mut self, use_savior: bool) -> Self {
        self.use_static_savior = use_savior;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
