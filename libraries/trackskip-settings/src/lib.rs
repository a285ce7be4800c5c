//! TrackSkip Settings
//!
//! The configuration provider for the seek engine: defaults, layered
//! loading (TOML file + `TRACKSKIP_*` environment), validated text setters,
//! and a shared store the engine re-reads on every event.
//!
//! # Example
//!
//! ```rust
//! use trackskip_core::SettingsProvider;
//! use trackskip_settings::{Settings, SettingsStore, TimingField};
//!
//! let store = SettingsStore::new(Settings::default());
//!
//! // Malformed input is rejected and the old value kept
//! assert!(store.apply_timing_input(TimingField::SeekStep, "abc").is_err());
//! store.apply_timing_input(TimingField::SeekStep, "15").unwrap();
//!
//! assert_eq!(store.current().timings.seek_step.as_secs(), 15);
//! ```

mod error;
mod settings;
mod store;

pub use error::{Result, SettingsError};
pub use settings::{Settings, Timing, TimingField, ENV_PREFIX};
pub use store::SettingsStore;
