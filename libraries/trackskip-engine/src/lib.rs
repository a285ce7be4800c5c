//! TrackSkip - Seek Trigger Engine
//!
//! Decides, from noisy key events and volume-level samples, when a user
//! wearing a headset wants to seek within the playing media instead of
//! changing the volume, and performs the seek.
//!
//! This crate provides:
//! - Mode dispatch (single-press headset, double-press volume, single-press any volume)
//! - Phone-key correlation (telling phone volume keys apart from headset changes)
//! - Double-press detection
//! - Volume-change classification with baseline restoration
//! - Endpoint selection, position estimation and seek execution
//! - An in-memory registry of active media sessions
//!
//! # Architecture
//!
//! `trackskip-engine` is platform-agnostic. Everything the engine needs from
//! the host (settings, audio route, volume writes, media sessions, debug
//! output) is injected through the traits in `trackskip-core`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use trackskip_core::{
//!     AudioRoute, EngineSettings, KeyCode, KeyEvent, MediaEndpoint, PlaybackSnapshot,
//!     PlaybackStatus, Result, SettingsProvider, SilentDebugSurface, Timestamp, VolumeSink,
//! };
//! use trackskip_engine::{ActiveSessions, Collaborators, SeekEngine};
//!
//! struct Defaults;
//! impl SettingsProvider for Defaults {
//!     fn current(&self) -> EngineSettings {
//!         EngineSettings::default()
//!     }
//! }
//!
//! struct Headset;
//! impl AudioRoute for Headset {
//!     fn is_headset_active(&self) -> bool {
//!         true
//!     }
//! }
//!
//! struct Mixer;
//! impl VolumeSink for Mixer {
//!     fn set_level(&self, _level: u32) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct Player;
//! impl MediaEndpoint for Player {
//!     fn name(&self) -> &str {
//!         "player"
//!     }
//!     fn snapshot(&self) -> Option<PlaybackSnapshot> {
//!         Some(PlaybackSnapshot {
//!             position: Duration::from_secs(30),
//!             status: PlaybackStatus::Paused,
//!             supports_seek_to: true,
//!             ..Default::default()
//!         })
//!     }
//!     fn seek_to(&self, _position: Duration) -> Result<()> {
//!         Ok(())
//!     }
//!     fn fast_forward(&self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn rewind(&self) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let sessions = Arc::new(ActiveSessions::new());
//! sessions.start_listening(vec![Arc::new(Player)]);
//!
//! let mut engine = SeekEngine::new(Collaborators {
//!     settings: Arc::new(Defaults),
//!     route: Arc::new(Headset),
//!     volume_sink: Arc::new(Mixer),
//!     registry: sessions,
//!     debug: Arc::new(SilentDebugSurface),
//! });
//!
//! let outcome = engine.on_key_event(KeyEvent::down(KeyCode::Next, true, Timestamp::from_millis(5)));
//! assert!(outcome.consumed());
//! ```

mod classifier;
mod correlator;
mod dispatcher;
mod double_press;
mod engine;
mod executor;
mod position;
mod restorer;
mod selector;
mod sessions;

// Public exports
pub use classifier::{VolumeClassifier, VolumeVerdict};
pub use correlator::{PhoneKeyCorrelator, PhoneKeyMark};
pub use dispatcher::{admits_volume, route_key, KeyRoute, PassReason};
pub use double_press::{DoublePressDetector, PendingPress, PressOutcome, PRESSES_PER_GESTURE};
pub use engine::{Collaborators, KeyOutcome, SeekEngine, SharedSeekEngine, VolumeOutcome};
pub use executor::{seek_target, SeekDecision, SeekExecutor, SeekMethod, SeekReport};
pub use position::estimate_position;
pub use restorer::BaselineRestorer;
pub use selector::{rank, select_best, Selection};
pub use sessions::ActiveSessions;
