//! Settings type definitions.

use serde::{Deserialize, Serialize};

use holdfast_core::PresenterConfig;

/// Root settings document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoldfastSettings {
    /// Presenter retention flags.
    pub retention: RetentionSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// The retention flags, as they appear in the settings file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetentionSettings {
    /// Keep presenters alive across configuration changes.
    pub retain_presenter: bool,
    /// Use the static registry as the retention channel.
    pub use_static_savior: bool,
}

impl Default for RetentionSettings {
    fn default() -> Self {
        let config = PresenterConfig::default();
        Self {
            retain_presenter: config.retain_presenter,
            use_static_savior: config.use_static_savior,
        }
    }
}

impl RetentionSettings {
    /// The [`PresenterConfig`] these settings describe.
    #[must_use]
    pub fn to_config(&self) -> PresenterConfig {
        PresenterConfig::new()
            .with_retain_presenter(self.retain_presenter)
            .with_static_savior(self.use_static_savior)
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level forwarded to the installed sink
    /// (`trace`/`debug`/`info`/`warn`/`error`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
