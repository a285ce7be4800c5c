//! Shared settings store
//!
//! One `Settings` value shared between whoever edits it (a settings screen,
//! a CLI flag) and the engine, which reads it on every event.

use crate::error::Result;
use crate::settings::{Settings, TimingField};
use std::sync::{Arc, RwLock};
use tracing::info;
use trackskip_core::{EngineSettings, SettingsProvider};

#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> Settings {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Modify the settings in place
    pub fn update<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> R {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// Apply a typed-in timing value; malformed input leaves the store unchanged
    pub fn apply_timing_input(&self, field: TimingField, input: &str) -> Result<()> {
        self.update(|settings| settings.apply_timing_input(field, input))?;
        info!(field = field.name(), input, "Timing setting updated");
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.update(|settings| settings.enabled = enabled);
    }

    pub fn set_debug(&self, debug: bool) {
        self.update(|settings| settings.debug = debug);
    }

    /// Advance to the next trigger mode, returning it
    pub fn cycle_mode(&self) -> trackskip_core::SeekTriggerMode {
        self.update(|settings| {
            settings.mode = settings.mode.cycle();
            settings.mode
        })
    }
}

impl SettingsProvider for SettingsStore {
    fn current(&self) -> EngineSettings {
        match self.inner.read() {
            Ok(guard) => guard.engine_settings(),
            Err(poisoned) => poisoned.into_inner().engine_settings(),
        }
    }
}
