//! User settings
//!
//! Defaults mirror the shipped app: enabled, double-press mode, 1200 ms
//! phone ignore window, 600 ms post-restore suppression, 450 ms double-press
//! window, 10 s seek step.

use crate::error::{Result, SettingsError};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use trackskip_core::{EngineSettings, SeekTriggerMode, Timings};

/// Environment variable prefix; nested keys use `__` (`TRACKSKIP_TIMING__SEEK_STEP_MS=15000`)
pub const ENV_PREFIX: &str = "TRACKSKIP";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub debug: bool,

    #[serde(default, deserialize_with = "lenient_mode")]
    pub mode: SeekTriggerMode,

    #[serde(default)]
    pub timing: Timing,
}

/// Timing settings, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Timing {
    #[serde(default = "default_phone_ignore_ms")]
    pub phone_ignore_window_ms: u64,

    #[serde(default = "default_post_restore_ms")]
    pub post_restore_suppress_ms: u64,

    #[serde(default = "default_double_press_ms")]
    pub double_press_window_ms: u64,

    #[serde(default = "default_seek_step_ms")]
    pub seek_step_ms: u64,
}

/// A timing field editable from text input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingField {
    /// Milliseconds
    PhoneIgnoreWindow,
    /// Milliseconds
    PostRestoreSuppress,
    /// Milliseconds
    DoublePressWindow,
    /// Whole seconds
    SeekStep,
}

impl TimingField {
    pub fn name(self) -> &'static str {
        match self {
            TimingField::PhoneIgnoreWindow => "phone_ignore_window_ms",
            TimingField::PostRestoreSuppress => "post_restore_suppress_ms",
            TimingField::DoublePressWindow => "double_press_window_ms",
            TimingField::SeekStep => "seek_step",
        }
    }
}

impl Settings {
    /// Load from an optional TOML file, overridden by `TRACKSKIP_*`
    /// environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| SettingsError::Load(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SettingsError::Load(e.to_string()))
    }

    /// Set the mode from its canonical name
    pub fn set_mode_name(&mut self, name: &str) -> Result<()> {
        self.mode = name
            .parse()
            .map_err(|_| SettingsError::UnknownMode(name.to_string()))?;
        Ok(())
    }

    /// Apply a value typed into a settings field
    ///
    /// Text that is not a non-negative integer is rejected and the
    /// previous value kept.
    pub fn apply_timing_input(&mut self, field: TimingField, input: &str) -> Result<()> {
        let value: u64 = match input.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(field = field.name(), input, "Ignoring malformed timing value");
                return Err(SettingsError::InvalidNumber {
                    field: field.name(),
                    input: input.to_string(),
                });
            }
        };

        match field {
            TimingField::PhoneIgnoreWindow => self.timing.phone_ignore_window_ms = value,
            TimingField::PostRestoreSuppress => self.timing.post_restore_suppress_ms = value,
            TimingField::DoublePressWindow => self.timing.double_press_window_ms = value,
            TimingField::SeekStep => self.timing.seek_step_ms = value.saturating_mul(1_000),
        }
        Ok(())
    }

    /// The per-event view the engine consumes
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            enabled: self.enabled,
            debug: self.debug,
            mode: self.mode,
            timings: self.timing.into(),
        }
    }
}

impl From<Timing> for Timings {
    fn from(t: Timing) -> Self {
        Timings {
            phone_ignore_window: Duration::from_millis(t.phone_ignore_window_ms),
            post_restore_suppress_window: Duration::from_millis(t.post_restore_suppress_ms),
            double_press_window: Duration::from_millis(t.double_press_window_ms),
            seek_step: Duration::from_millis(t.seek_step_ms),
        }
    }
}

/// Unknown stored modes fall back to the default instead of failing the load
fn lenient_mode<'de, D>(deserializer: D) -> std::result::Result<SeekTriggerMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|_| {
        warn!(mode = %raw, "Unknown seek trigger mode, using default");
        SeekTriggerMode::default()
    }))
}

// Default values
fn default_enabled() -> bool {
    true
}

fn default_phone_ignore_ms() -> u64 {
    1_200
}

fn default_post_restore_ms() -> u64 {
    600
}

fn default_double_press_ms() -> u64 {
    450
}

fn default_seek_step_ms() -> u64 {
    10_000
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            phone_ignore_window_ms: default_phone_ignore_ms(),
            post_restore_suppress_ms: default_post_restore_ms(),
            double_press_window_ms: default_double_press_ms(),
            seek_step_ms: default_seek_step_ms(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            debug: false,
            mode: SeekTriggerMode::default(),
            timing: Timing::default(),
        }
    }
}
